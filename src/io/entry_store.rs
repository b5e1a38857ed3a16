use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::ops::tags::rank_tags;
use crate::parse::front_matter::{FrontMatter, FrontMatterError, parse_front_matter};

/// The index file kept alongside entries; never treated as an entry.
pub const INDEX_FILE: &str = "README.md";

/// Highest collision suffix tried before giving up.
const MAX_SUFFIX: usize = 999;

/// Error type for persisting entries
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not create {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("no free file name for {name} in {}", dir.display())]
    NoFreeName { dir: PathBuf, name: String },
}

/// An entry file whose front matter parsed.
#[derive(Debug, Clone)]
pub struct ScannedEntry {
    pub file_name: String,
    pub front_matter: FrontMatter,
}

/// Why a file was left out of a scan.
#[derive(Debug)]
pub enum SkipReason {
    Read(io::Error),
    FrontMatter(FrontMatterError),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Read(e) => write!(f, "could not read: {}", e),
            SkipReason::FrontMatter(e) => write!(f, "malformed front matter: {}", e),
        }
    }
}

/// A file left out of a scan, with the reason.
#[derive(Debug)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: SkipReason,
}

/// Result of reading every entry file in the store, in file-name order.
#[derive(Debug, Default)]
pub struct Scan {
    pub entries: Vec<ScannedEntry>,
    pub skipped: Vec<SkippedFile>,
}

/// The directory entries are written to and read back from.
#[derive(Debug, Clone)]
pub struct EntryStore {
    dir: PathBuf,
}

impl EntryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        EntryStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `content` as a new entry named `filename`, creating the directory
    /// when needed. An existing file is never replaced: the first free name
    /// among `<stem>.md`, `<stem>-2.md`, `<stem>-3.md`, ... is used instead.
    /// Returns the absolute path written.
    pub fn save(&self, filename: &str, content: &str) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::CreateDir {
            path: self.dir.clone(),
            source: e,
        })?;
        let dir = absolute(&self.dir);

        let write_err = |path: &Path, source: io::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| write_err(&dir, e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.flush())
            .map_err(|e| write_err(tmp.path(), e))?;

        let (stem, ext) = split_extension(filename);
        for n in 1..=MAX_SUFFIX {
            let candidate = if n == 1 {
                dir.join(filename)
            } else {
                dir.join(format!("{}-{}{}", stem, n, ext))
            };
            if candidate.exists() {
                continue;
            }
            match tmp.persist_noclobber(&candidate) {
                Ok(_) => {
                    tracing::debug!(path = %candidate.display(), "saved entry");
                    return Ok(candidate);
                }
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    tmp = e.file;
                }
                Err(e) => return Err(write_err(&candidate, e.error)),
            }
        }
        Err(StoreError::NoFreeName {
            dir,
            name: filename.to_string(),
        })
    }

    /// Entry file names (`*.md` except the index), sorted by name.
    pub fn entry_files(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for dirent in fs::read_dir(&self.dir)? {
            let dirent = dirent?;
            if !dirent.file_type()?.is_file() {
                continue;
            }
            let Some(name) = dirent.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.ends_with(".md") && name != INDEX_FILE {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Parse the front matter of every entry file. Unreadable or malformed
    /// files are reported in `skipped`; only a failure to list the directory
    /// is an error.
    pub fn scan(&self) -> io::Result<Scan> {
        let mut scan = Scan::default();
        for file_name in self.entry_files()? {
            let path = self.dir.join(&file_name);
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    scan.skipped.push(SkippedFile {
                        file_name,
                        reason: SkipReason::Read(e),
                    });
                    continue;
                }
            };
            match parse_front_matter(&text) {
                Ok((front_matter, _)) => scan.entries.push(ScannedEntry {
                    file_name,
                    front_matter,
                }),
                Err(e) => scan.skipped.push(SkippedFile {
                    file_name,
                    reason: SkipReason::FrontMatter(e),
                }),
            }
        }
        tracing::debug!(
            dir = %self.dir.display(),
            entries = scan.entries.len(),
            skipped = scan.skipped.len(),
            "scanned entries"
        );
        Ok(scan)
    }

    /// The `n` most used tags across all entries, most frequent first. Ties
    /// keep the order in which tags were first seen, scanning files by name.
    /// Never fails: an unreadable directory just yields no suggestions.
    pub fn frequent_tags(&self, n: usize) -> Vec<String> {
        let scan = match self.scan() {
            Ok(scan) => scan,
            Err(e) => {
                tracing::debug!(dir = %self.dir.display(), error = %e, "tag scan failed");
                return Vec::new();
            }
        };
        rank_tags(scan.entries.iter().map(|e| e.front_matter.list("tags")), n)
    }
}

/// Write `content` to `path` through a temp file in the same directory, so a
/// failed write leaves any previous file untouched.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// `"a.md"` -> `("a", ".md")`; names without an extension keep it empty.
fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(i) if i > 0 => (&filename[..i], &filename[i..]),
        _ => (filename, ""),
    }
}
