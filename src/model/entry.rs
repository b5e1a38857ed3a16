use chrono::{DateTime, FixedOffset};

/// Author recorded when no version-control identity is available.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One captured prompt, persisted as a markdown file with front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub date: DateTime<FixedOffset>,
    pub author: String,
    pub tool: String,
    pub tags: Vec<String>,
    pub prompt: String,
    /// Pasted model output; empty when none was given
    pub output: String,
}

/// A capture that cannot be saved as entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Prompt is required")]
    EmptyPrompt,
}

/// Reject prompts that are empty once surrounding whitespace is removed.
pub fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().is_empty() {
        return Err(ValidationError::EmptyPrompt);
    }
    Ok(())
}

impl Entry {
    pub fn has_output(&self) -> bool {
        !self.output.trim().is_empty()
    }
}
