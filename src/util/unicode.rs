use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells a tab occupies when a text area is drawn.
pub const TAB_WIDTH: usize = 4;

/// Display width in terminal cells, with tabs at `TAB_WIDTH`.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

fn grapheme_width(g: &str) -> usize {
    if g == "\t" {
        TAB_WIDTH
    } else {
        UnicodeWidthStr::width(g)
    }
}

/// Byte offset of the grapheme after the one at `byte_offset`, or None at the end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let rest = s.get(byte_offset..)?;
    let g = rest.graphemes(true).next()?;
    Some(byte_offset + g.len())
}

/// Byte offset of the grapheme before `byte_offset`, or None at the start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let head = s.get(..byte_offset)?;
    let g = head.graphemes(true).next_back()?;
    Some(byte_offset - g.len())
}

/// Display column of `byte_offset` within `s`.
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}

/// Byte offset of the grapheme covering display column `col`; `s.len()`
/// when the column is past the end.
pub fn display_col_to_byte_offset(s: &str, col: usize) -> usize {
    let mut width = 0;
    for (i, g) in s.grapheme_indices(true) {
        let w = grapheme_width(g);
        if width + w > col {
            return i;
        }
        width += w;
    }
    s.len()
}

fn is_space(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Start of the word at or before `byte_offset`, skipping whitespace first.
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let head = &s[..byte_offset.min(s.len())];
    let mut graphemes = head.grapheme_indices(true).rev().peekable();
    while graphemes.next_if(|(_, g)| is_space(g)).is_some() {}
    let mut start = head.len();
    while let Some((i, _)) = graphemes.next_if(|(_, g)| !is_space(g)) {
        start = i;
    }
    if start == head.len() { 0 } else { start }
}

/// Start of the next word after `byte_offset`, or the end of `s`.
pub fn word_boundary_right(s: &str, byte_offset: usize) -> usize {
    let offset = byte_offset.min(s.len());
    let mut graphemes = s[offset..].grapheme_indices(true).peekable();
    while graphemes.next_if(|(_, g)| !is_space(g)).is_some() {}
    while graphemes.next_if(|(_, g)| is_space(g)).is_some() {}
    graphemes.peek().map_or(s.len(), |(i, _)| offset + i)
}

/// The part of `s` visible in a window starting at display column `skip`
/// and `width` cells wide. Tabs are expanded to spaces; a wide grapheme cut
/// by the left edge is dropped.
pub fn visible_slice(s: &str, skip: usize, width: usize) -> String {
    let mut out = String::new();
    let mut col = 0;
    for g in s.graphemes(true) {
        let w = grapheme_width(g);
        let start = col;
        col += w;
        if start < skip {
            continue;
        }
        if col - skip > width {
            break;
        }
        if g == "\t" {
            out.push_str(&" ".repeat(TAB_WIDTH));
        } else {
            out.push_str(g);
        }
    }
    out
}

/// Truncate to at most `max_cells`, ending with `…` when anything was cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let mut out = visible_slice(s, 0, max_cells - 1);
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width("cafe\u{0301}"), 4);
        assert_eq!(display_width("a\tb"), 2 + TAB_WIDTH);
    }

    #[test]
    fn grapheme_steps() {
        let s = "ae\u{0301}b";
        assert_eq!(next_grapheme_boundary(s, 0), Some(1));
        assert_eq!(next_grapheme_boundary(s, 1), Some(4));
        assert_eq!(next_grapheme_boundary(s, s.len()), None);
        assert_eq!(prev_grapheme_boundary(s, 4), Some(1));
        assert_eq!(prev_grapheme_boundary(s, 0), None);
    }

    #[test]
    fn columns_and_offsets() {
        let s = "a你b";
        assert_eq!(byte_offset_to_display_col(s, 4), 3);
        assert_eq!(display_col_to_byte_offset(s, 1), 1);
        // inside the wide char snaps to its start
        assert_eq!(display_col_to_byte_offset(s, 2), 1);
        assert_eq!(display_col_to_byte_offset(s, 3), 4);
        assert_eq!(display_col_to_byte_offset(s, 99), s.len());
    }

    #[test]
    fn word_jumps() {
        let s = "fix the  bug";
        assert_eq!(word_boundary_left(s, s.len()), 9);
        assert_eq!(word_boundary_left(s, 9), 4);
        assert_eq!(word_boundary_left(s, 2), 0);
        assert_eq!(word_boundary_left(s, 0), 0);
        assert_eq!(word_boundary_right(s, 0), 4);
        assert_eq!(word_boundary_right(s, 4), 9);
        assert_eq!(word_boundary_right(s, 9), s.len());
    }

    #[test]
    fn visible_window() {
        assert_eq!(visible_slice("abcdef", 2, 3), "cde");
        assert_eq!(visible_slice("a\tb", 0, 10), "a    b");
        assert_eq!(visible_slice("你好", 1, 4), "好");
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
    }
}
