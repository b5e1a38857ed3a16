use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// A multi-line text buffer with a cursor and a vertical scroll offset.
///
/// The cursor is a (row, byte offset) pair; the byte offset always sits on a
/// grapheme boundary of its line.
#[derive(Debug, Clone)]
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    col: usize,
    /// Display column kept across vertical moves
    sticky_col: Option<usize>,
    /// First visible line
    pub scroll: usize,
    max_chars: usize,
}

impl TextArea {
    pub fn new(max_chars: usize) -> Self {
        TextArea {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            sticky_col: None,
            scroll: 0,
            max_chars,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// Characters stored, counting line breaks.
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum::<usize>() + self.lines.len() - 1
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Cursor as (row, display column).
    pub fn cursor(&self) -> (usize, usize) {
        let line = &self.lines[self.row];
        (self.row, unicode::byte_offset_to_display_col(line, self.col))
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.row = 0;
        self.col = 0;
        self.sticky_col = None;
        self.scroll = 0;
    }

    /// Keep the cursor row inside a window `height` lines tall.
    pub fn clamp_scroll(&mut self, height: usize) {
        let height = height.max(1);
        let max_scroll = self.lines.len().saturating_sub(height);
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + height {
            self.scroll = self.row + 1 - height;
        }
        self.scroll = self.scroll.min(max_scroll);
    }

    /// Insert text at the cursor, keeping line breaks. Text past the
    /// character limit is dropped; returns false when anything was dropped.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let room = self.max_chars.saturating_sub(self.char_count());
        let kept: String = text.chars().take(room).collect();
        let complete = kept.len() == text.len();

        let tail = self.lines[self.row].split_off(self.col);
        let mut pieces = kept.split('\n');
        if let Some(first) = pieces.next() {
            self.lines[self.row].push_str(first);
        }
        for piece in pieces {
            self.row += 1;
            self.lines.insert(self.row, piece.to_string());
        }
        self.col = self.lines[self.row].len();
        self.lines[self.row].push_str(&tail);
        self.sticky_col = None;
        complete
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf))
    }

    pub fn newline(&mut self) -> bool {
        self.insert_str("\n")
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.lines[self.row], self.col) {
            self.lines[self.row].replace_range(prev..self.col, "");
            self.col = prev;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.lines[self.row].len();
            self.lines[self.row].push_str(&line);
        }
        self.sticky_col = None;
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.lines[self.row], self.col) {
            self.lines[self.row].replace_range(self.col..next, "");
        } else if self.row + 1 < self.lines.len() {
            let line = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&line);
        }
        self.sticky_col = None;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.lines[self.row], self.col) {
            self.col = prev;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.lines[self.row].len();
        }
        self.sticky_col = None;
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.lines[self.row], self.col) {
            self.col = next;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
        self.sticky_col = None;
    }

    pub fn move_up(&mut self) {
        if self.row == 0 {
            self.col = 0;
            return;
        }
        let target = self.sticky_target();
        self.row -= 1;
        self.col = unicode::display_col_to_byte_offset(&self.lines[self.row], target);
    }

    pub fn move_down(&mut self) {
        if self.row + 1 >= self.lines.len() {
            self.col = self.lines[self.row].len();
            return;
        }
        let target = self.sticky_target();
        self.row += 1;
        self.col = unicode::display_col_to_byte_offset(&self.lines[self.row], target);
    }

    fn sticky_target(&mut self) -> usize {
        let col = self.cursor().1;
        *self.sticky_col.get_or_insert(col)
    }

    pub fn line_start(&mut self) {
        self.col = 0;
        self.sticky_col = None;
    }

    pub fn line_end(&mut self) {
        self.col = self.lines[self.row].len();
        self.sticky_col = None;
    }

    pub fn word_left(&mut self) {
        if self.col == 0 {
            self.move_left();
            return;
        }
        self.col = unicode::word_boundary_left(&self.lines[self.row], self.col);
        self.sticky_col = None;
    }

    pub fn word_right(&mut self) {
        let line = &self.lines[self.row];
        if self.col >= line.len() {
            self.move_right();
            return;
        }
        self.col = unicode::word_boundary_right(line, self.col);
        self.sticky_col = None;
    }

    pub fn kill_to_line_start(&mut self) {
        self.lines[self.row].replace_range(..self.col, "");
        self.col = 0;
        self.sticky_col = None;
    }

    pub fn kill_to_line_end(&mut self) {
        if self.col >= self.lines[self.row].len() {
            // at end of line: join with the next one
            self.delete();
            return;
        }
        self.lines[self.row].truncate(self.col);
        self.sticky_col = None;
    }

    pub fn delete_word_back(&mut self) {
        if self.col == 0 {
            self.backspace();
            return;
        }
        let start = unicode::word_boundary_left(&self.lines[self.row], self.col);
        self.lines[self.row].replace_range(start..self.col, "");
        self.col = start;
        self.sticky_col = None;
    }

    /// Apply an editing key. Returns false for keys a text area does not use.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('a') if ctrl => self.line_start(),
            KeyCode::Char('e') if ctrl => self.line_end(),
            KeyCode::Char('u') if ctrl => self.kill_to_line_start(),
            KeyCode::Char('k') if ctrl => self.kill_to_line_end(),
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char('b') if alt => self.word_left(),
            KeyCode::Char('f') if alt => self.word_right(),
            KeyCode::Char(c) if !ctrl && !alt => {
                self.insert_char(c);
            }
            KeyCode::Enter => {
                self.newline();
            }
            KeyCode::Backspace if alt => self.delete_word_back(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left if alt || ctrl => self.word_left(),
            KeyCode::Right if alt || ctrl => self.word_right(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.line_start(),
            KeyCode::End => self.line_end(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(s: &str) -> TextArea {
        let mut ta = TextArea::new(1000);
        for c in s.chars() {
            if c == '\n' {
                ta.handle_key(key(KeyCode::Enter));
            } else {
                ta.handle_key(key(KeyCode::Char(c)));
            }
        }
        ta
    }

    #[test]
    fn typing_and_newlines() {
        let ta = typed("hello\nworld");
        assert_eq!(ta.text(), "hello\nworld");
        assert_eq!(ta.cursor(), (1, 5));
        assert_eq!(ta.char_count(), 11);
    }

    #[test]
    fn backspace_joins_lines() {
        let mut ta = typed("ab\ncd");
        ta.line_start();
        ta.backspace();
        assert_eq!(ta.text(), "abcd");
        assert_eq!(ta.cursor(), (0, 2));
    }

    #[test]
    fn delete_at_line_end_joins_next() {
        let mut ta = typed("ab\ncd");
        ta.move_up();
        ta.line_end();
        ta.delete();
        assert_eq!(ta.text(), "abcd");
    }

    #[test]
    fn insert_in_middle() {
        let mut ta = typed("held");
        ta.move_left();
        ta.move_left();
        ta.insert_str("llo wor");
        assert_eq!(ta.text(), "hello world");
    }

    #[test]
    fn paste_multiline_in_middle() {
        let mut ta = typed("AZ");
        ta.move_left();
        ta.insert_str("b\r\nc\rd");
        assert_eq!(ta.text(), "Ab\nc\ndZ");
        assert_eq!(ta.cursor(), (2, 1));
    }

    #[test]
    fn vertical_moves_keep_column() {
        let mut ta = typed("long line\nx\nanother");
        ta.move_up();
        ta.move_up();
        assert_eq!(ta.cursor(), (0, 7));
        ta.move_down();
        assert_eq!(ta.cursor(), (1, 1));
        ta.move_down();
        assert_eq!(ta.cursor(), (2, 7));
    }

    #[test]
    fn kill_keys() {
        let mut ta = typed("one two three");
        ta.word_left();
        ta.kill_to_line_start();
        assert_eq!(ta.text(), "three");
        ta.line_end();
        ta.word_left();
        ta.kill_to_line_end();
        assert_eq!(ta.text(), "");
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut ta = typed("fix the bug");
        ta.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(ta.text(), "fix the ");
    }

    #[test]
    fn character_limit() {
        let mut ta = TextArea::new(5);
        assert!(ta.insert_str("abc"));
        assert!(!ta.insert_str("defg"));
        assert_eq!(ta.text(), "abcde");
        assert!(!ta.insert_char('x'));
        assert_eq!(ta.text(), "abcde");
    }

    #[test]
    fn graphemes_move_as_one() {
        let mut ta = typed("e\u{0301}x");
        ta.move_left();
        ta.move_left();
        assert_eq!(ta.cursor(), (0, 0));
        ta.delete();
        assert_eq!(ta.text(), "x");
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut ta = typed("1\n2\n3\n4\n5\n6");
        ta.clamp_scroll(3);
        assert_eq!(ta.scroll, 3);
        for _ in 0..5 {
            ta.move_up();
        }
        ta.clamp_scroll(3);
        assert_eq!(ta.scroll, 0);
        // a taller window never scrolls past the top of the text
        ta.scroll = 5;
        ta.clamp_scroll(10);
        assert_eq!(ta.scroll, 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut ta = typed("a\nb");
        ta.scroll = 1;
        ta.clear();
        assert_eq!(ta.text(), "");
        assert_eq!(ta.cursor(), (0, 0));
        assert_eq!(ta.scroll, 0);
        assert!(ta.is_blank());
    }

    #[test]
    fn unhandled_keys() {
        let mut ta = TextArea::new(10);
        assert!(!ta.handle_key(key(KeyCode::F(5))));
        assert!(!ta.handle_key(key(KeyCode::Esc)));
    }
}
