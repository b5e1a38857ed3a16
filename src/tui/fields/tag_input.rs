use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// Tag entry: committed tags, the token being typed, and suggestions.
#[derive(Debug, Clone, Default)]
pub struct TagInput {
    tags: Vec<String>,
    pub input: String,
    suggestions: Vec<String>,
    /// Index into `visible_suggestions()`
    highlighted: Option<usize>,
}

impl TagInput {
    pub fn new(suggestions: Vec<String>) -> Self {
        TagInput {
            suggestions,
            ..TagInput::default()
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
        self.highlighted = None;
    }

    /// Suggestions not yet used, narrowed to those starting with the
    /// current input (case-insensitive).
    pub fn visible_suggestions(&self) -> Vec<&str> {
        let needle = self.input.trim().to_lowercase();
        self.suggestions
            .iter()
            .filter(|s| !self.tags.contains(s))
            .filter(|s| s.to_lowercase().starts_with(&needle))
            .map(|s| s.as_str())
            .collect()
    }

    /// Add the highlighted suggestion, or else the typed token. Duplicates
    /// and blank tokens are dropped. The input is cleared either way.
    pub fn commit(&mut self) {
        let choice = match self.highlighted {
            Some(i) => self.visible_suggestions().get(i).map(|s| s.to_string()),
            None => None,
        };
        let tag = choice.unwrap_or_else(|| self.input.trim().to_string());
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self.input.clear();
        self.highlighted = None;
    }

    pub fn pop_tag(&mut self) -> Option<String> {
        self.highlighted = None;
        self.tags.pop()
    }

    /// Clear tags and input, keeping the suggestion list.
    pub fn reset(&mut self) {
        self.tags.clear();
        self.input.clear();
        self.highlighted = None;
    }

    fn cycle(&mut self, forward: bool) {
        let n = self.visible_suggestions().len();
        if n == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match (self.highlighted, forward) {
            (None, true) => 0,
            (None, false) => n - 1,
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
        });
    }

    /// Pasted text becomes input; commas and line breaks separate tags.
    pub fn paste(&mut self, text: &str) {
        let mut parts = text.split([',', '\n', '\r']).peekable();
        while let Some(part) = parts.next() {
            self.input.push_str(part);
            if parts.peek().is_some() {
                self.highlighted = None;
                self.commit();
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                self.highlighted = None;
            }
            KeyCode::Enter | KeyCode::Char(',') if !ctrl && !alt => self.commit(),
            KeyCode::Char(c) if !ctrl && !alt => {
                self.input.push(c);
                self.highlighted = None;
            }
            KeyCode::Backspace => {
                if self.input.is_empty() {
                    self.pop_tag();
                } else {
                    let end = self.input.len();
                    let start = unicode::prev_grapheme_boundary(&self.input, end).unwrap_or(0);
                    self.input.truncate(start);
                    self.highlighted = None;
                }
            }
            KeyCode::Down => self.cycle(true),
            KeyCode::Up => self.cycle(false),
            _ => return false,
        }
        true
    }
}
