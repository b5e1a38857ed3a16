use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::io::entry_store::{EntryStore, SkipReason};
use crate::parse::front_matter::FrontMatter;

const PREAMBLE: &str = "\
# Prompts

A shared collection of AI prompts captured by the team. Learn from each other's techniques, discover effective patterns, and build institutional knowledge around AI-assisted development.

**What is this?** This directory contains prompts saved using `crumb`, a tool for capturing and sharing AI prompts across a team.

## Index

| Date | Author | Tool | Tags | Title |
|------|--------|------|------|-------|
";

const FOOTER: &str = "
---
*Run `crumb readme` to regenerate this index.*
";

/// Error type for index generation
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("{} does not exist (run `crumb init` first)", path.display())]
    DirectoryMissing { path: PathBuf },
    #[error("could not list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A file left out of the index.
#[derive(Debug)]
pub struct IndexWarning {
    pub file_name: String,
    pub reason: SkipReason,
}

impl std::fmt::Display for IndexWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skipped {}: {}", self.file_name, self.reason)
    }
}

/// A generated index document plus what went into it.
#[derive(Debug)]
pub struct IndexReport {
    pub markdown: String,
    pub rows: usize,
    pub warnings: Vec<IndexWarning>,
}

/// One table row, built from an entry's front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub file_name: String,
    /// Parsed `date`; None sorts last
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub date: String,
    pub author: String,
    pub tool: String,
    pub tags: Vec<String>,
    pub title: String,
}

impl IndexRow {
    pub fn from_front_matter(file_name: &str, fm: &FrontMatter) -> Self {
        let raw_date = fm.get("date").unwrap_or("").trim();
        let timestamp = parse_timestamp(raw_date);
        let date = match timestamp {
            Some(ts) => ts.format("%Y-%m-%d").to_string(),
            None => raw_date.to_string(),
        };
        IndexRow {
            file_name: file_name.to_string(),
            timestamp,
            date,
            author: fm.get("author").unwrap_or("").to_string(),
            tool: fm.get("tool").unwrap_or("").to_string(),
            tags: fm.list("tags").to_vec(),
            title: fm.get("title").unwrap_or("").to_string(),
        }
    }

    fn render(&self) -> String {
        let title = if self.title.trim().is_empty() {
            self.file_name.trim_end_matches(".md")
        } else {
            self.title.as_str()
        };
        format!(
            "| {} | {} | {} | {} | [{}]({}) |\n",
            cell(&self.date),
            cell(&self.author),
            cell(&self.tool),
            cell(&self.tags.join(", ")),
            link_text(&cell(title)),
            self.file_name.replace(' ', "%20"),
        )
    }
}

/// RFC 3339 timestamps, or a bare `YYYY-MM-DD` taken as midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
}

/// Table cells are one line and cannot contain a bare `|`.
fn cell(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn link_text(value: &str) -> String {
    value.replace('[', "\\[").replace(']', "\\]")
}

/// Most recent first; rows without a usable date go last. The sort is
/// stable, so ties keep their incoming (file-name) order.
pub fn sort_rows(rows: &mut [IndexRow]) {
    rows.sort_by(|a, b| match (&a.timestamp, &b.timestamp) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Render the full index document for already-sorted rows. Zero rows gives
/// the starter document written by `crumb init`.
pub fn render_index(rows: &[IndexRow]) -> String {
    let mut out = String::from(PREAMBLE);
    for row in rows {
        out.push_str(&row.render());
    }
    out.push_str(FOOTER);
    out
}

/// Build the index for every entry in `dir`. Files with unreadable or
/// malformed front matter are left out and reported as warnings.
pub fn generate_index(dir: &Path) -> Result<IndexReport, IndexError> {
    if !dir.is_dir() {
        return Err(IndexError::DirectoryMissing {
            path: dir.to_path_buf(),
        });
    }
    let scan = EntryStore::new(dir)
        .scan()
        .map_err(|e| IndexError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?;

    let mut rows: Vec<IndexRow> = scan
        .entries
        .iter()
        .map(|e| IndexRow::from_front_matter(&e.file_name, &e.front_matter))
        .collect();
    sort_rows(&mut rows);

    let warnings: Vec<IndexWarning> = scan
        .skipped
        .into_iter()
        .map(|s| IndexWarning {
            file_name: s.file_name,
            reason: s.reason,
        })
        .collect();
    for w in &warnings {
        tracing::debug!(file = %w.file_name, reason = %w.reason, "left out of index");
    }

    Ok(IndexReport {
        markdown: render_index(&rows),
        rows: rows.len(),
        warnings,
    })
}
