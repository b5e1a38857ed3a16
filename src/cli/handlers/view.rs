use std::fmt::Write as _;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crossterm::style::Stylize;

use crate::io::config_io;
use crate::parse::parse_front_matter;

/// Print a captured entry (or any markdown file) to the terminal.
pub fn cmd_view(args: &[String], work_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let Some(name) = args.first() else {
        return Err("no command given".into());
    };
    if !name.ends_with(".md") {
        return Err(format!("unknown command: {} (try `crumb --help`)", name).into());
    }
    if args.len() > 1 {
        return Err(format!("unexpected arguments after {}: {}", name, args[1..].join(" ")).into());
    }

    let path = resolve(name, work_dir)?;
    let source = std::fs::read_to_string(&path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let styled = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    print!("{}", format_entry(&source, styled));
    Ok(())
}

/// Relative names are looked up in the working directory first, then in the
/// configured output directory.
fn resolve(name: &str, work_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let direct = work_dir.join(name);
    if direct.is_file() {
        return Ok(direct);
    }
    let config = config_io::load_config()?;
    let in_output = config.output_path(work_dir).join(name);
    if in_output.is_file() {
        return Ok(in_output);
    }
    Err(format!("no such file: {}", direct.display()).into())
}

/// Render markdown for a terminal: the front matter becomes a short summary
/// and headings are highlighted. With `styled` off the output is plain text.
pub fn format_entry(source: &str, styled: bool) -> String {
    let mut out = String::new();
    let body = match parse_front_matter(source) {
        Ok((fm, body)) => {
            if let Some(title) = fm.get("title").filter(|t| !t.is_empty()) {
                push_heading(&mut out, title, styled);
            }
            let meta: Vec<&str> = ["date", "author", "tool"]
                .iter()
                .filter_map(|k| fm.get(k))
                .filter(|v| !v.is_empty())
                .collect();
            if !meta.is_empty() {
                push_dim(&mut out, &meta.join(" \u{00B7} "), styled);
            }
            let tags = fm.list("tags");
            if !tags.is_empty() {
                let tags: Vec<String> = tags.iter().map(|t| format!("#{}", t)).collect();
                push_dim(&mut out, &tags.join(" "), styled);
            }
            out.push('\n');
            body.trim_start_matches(['\n', '\r'])
        }
        Err(e) => {
            tracing::debug!(error = %e, "showing file without front matter summary");
            source
        }
    };

    let mut in_fence = false;
    for line in body.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            push_dim(&mut out, line, styled);
        } else if !in_fence && line.starts_with('#') {
            push_heading(&mut out, line.trim_start_matches('#').trim(), styled);
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

fn push_heading(out: &mut String, text: &str, styled: bool) {
    if styled {
        let _ = writeln!(out, "{}", text.bold().magenta());
    } else {
        let _ = writeln!(out, "{}", text);
    }
}

fn push_dim(out: &mut String, text: &str, styled: bool) {
    if styled {
        let _ = writeln!(out, "{}", text.dark_grey());
    } else {
        let _ = writeln!(out, "{}", text);
    }
}
