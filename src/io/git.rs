use std::path::Path;
use std::process::Command;

use crate::model::entry::UNKNOWN_AUTHOR;

/// `git config user.name` as seen from `dir`, or None when git is missing,
/// fails, or has no name configured.
pub fn user_name(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .arg("config")
        .arg("user.name")
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if name.is_empty() { None } else { Some(name) }
}

/// The author recorded on new entries.
pub fn author(dir: &Path) -> String {
    user_name(dir).unwrap_or_else(|| {
        tracing::debug!("no git user.name, using fallback author");
        UNKNOWN_AUTHOR.to_string()
    })
}
