use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-choice tool selector with an optional open list.
#[derive(Debug, Clone)]
pub struct ToolSelect {
    options: Vec<String>,
    selected: usize,
    pub open: bool,
}

impl ToolSelect {
    /// `initial` is selected, and appended to the options if it is not
    /// already one of them.
    pub fn new(mut options: Vec<String>, initial: &str) -> Self {
        let selected = match options.iter().position(|o| o == initial) {
            Some(i) => i,
            None => {
                options.push(initial.to_string());
                options.len() - 1
            }
        };
        ToolSelect {
            options,
            selected,
            open: false,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &str {
        self.options.get(self.selected).map_or("", |s| s.as_str())
    }

    pub fn next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => self.prev(),
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => self.next(),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.options.len().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.open = !self.open,
            _ => return false,
        }
        true
    }
}
