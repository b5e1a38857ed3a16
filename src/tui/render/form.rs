use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Field};
use crate::tui::fields::TextArea;
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::FormLayout;

const PROMPT_PLACEHOLDER: &str = "Type or paste the prompt you gave the AI...";
const OUTPUT_PLACEHOLDER: &str = "Paste what it answered (optional)";

/// Longest tool list drawn at once
const MAX_LIST_ROWS: usize = 8;

pub(super) fn render_text_areas(
    frame: &mut Frame,
    app: &App,
    theme: &Theme,
    layout: &FormLayout,
) {
    render_text_area(
        frame,
        theme,
        &app.prompt,
        app.focus == Field::Prompt,
        "Prompt",
        PROMPT_PLACEHOLDER,
        layout.prompt,
    );
    render_text_area(
        frame,
        theme,
        &app.output,
        app.focus == Field::Output,
        "Paste Output (optional)",
        OUTPUT_PLACEHOLDER,
        layout.output,
    );
}

fn render_text_area(
    frame: &mut Frame,
    theme: &Theme,
    ta: &TextArea,
    focused: bool,
    label: &str,
    placeholder: &str,
    area: Rect,
) {
    let title = if focused {
        format!(" \u{2192} {} ", label)
    } else {
        format!(" {} ", label)
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(Span::styled(title, theme.label_style(focused)));
    // show the count once the limit comes into view
    let count = ta.char_count();
    if count * 10 >= ta.max_chars() * 9 {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {}/{} ", count, ta.max_chars()),
                theme.hint_style(),
            ))
            .right_aligned(),
        );
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if ta.text().is_empty() && !focused {
        let text = unicode::truncate_to_width(placeholder, inner.width as usize);
        frame.render_widget(Paragraph::new(Span::styled(text, theme.hint_style())), inner);
        return;
    }

    let width = inner.width as usize;
    let (row, col) = ta.cursor();
    // horizontal scroll keeps the cursor column on screen
    let skip = if focused {
        col.saturating_sub(width.saturating_sub(1))
    } else {
        0
    };

    let lines: Vec<Line> = ta
        .lines()
        .iter()
        .skip(ta.scroll)
        .take(inner.height as usize)
        .map(|l| {
            Line::from(Span::styled(
                unicode::visible_slice(l, skip, width),
                theme.text_style(),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    if focused && row >= ta.scroll && row < ta.scroll + inner.height as usize {
        frame.set_cursor_position(Position::new(
            inner.x + (col - skip) as u16,
            inner.y + (row - ta.scroll) as u16,
        ));
    }
}

pub(super) fn render_tool_row(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let focused = app.focus == Field::Tool;
    let label = if focused { "\u{2192} Tool: " } else { "Tool: " };
    let mut spans = vec![
        Span::styled(label, theme.label_style(focused)),
        Span::styled("\u{2039} ", theme.hint_style()),
        Span::styled(app.tool.selected().to_string(), theme.text_style()),
        Span::styled(" \u{203A}", theme.hint_style()),
    ];
    if focused {
        spans.push(Span::styled(
            "  (\u{2191}/\u{2193} to change, enter for list)",
            theme.hint_style(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Dropdown of every tool, below the tool row when it fits, else above.
pub(super) fn render_tool_list(
    frame: &mut Frame,
    app: &App,
    theme: &Theme,
    row: Rect,
    screen: Rect,
) {
    let options = app.tool.options();
    if options.is_empty() {
        return;
    }
    let selected = app.tool.selected_index();
    let visible = options.len().min(MAX_LIST_ROWS);
    let first = selected
        .saturating_sub(visible - 1)
        .min(options.len() - visible);

    let label_width = unicode::display_width("\u{2192} Tool: ") as u16;
    let widest = options
        .iter()
        .map(|o| unicode::display_width(o))
        .max()
        .unwrap_or(0) as u16;
    let width = (widest + 4).min(screen.width.saturating_sub(label_width));
    let height = (visible as u16 + 2).min(screen.height);
    let below = row.y + 1;
    let y = if below + height <= screen.bottom() {
        below
    } else {
        row.y.saturating_sub(height)
    };
    let area = Rect::new(row.x + label_width, y, width, height).intersection(screen);

    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, o)| {
            let style = if i == selected {
                theme.selection_style()
            } else {
                theme.text_style()
            };
            Line::from(Span::styled(format!(" {} ", o), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(true));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub(super) fn render_tag_rows(
    frame: &mut Frame,
    app: &App,
    theme: &Theme,
    tags_area: Rect,
    suggestions_area: Rect,
) {
    let focused = app.focus == Field::Tags;
    let label = if focused { "\u{2192} Tags: " } else { "Tags: " };
    let mut spans = vec![Span::styled(label, theme.label_style(focused))];
    for tag in app.tags.tags() {
        spans.push(Span::styled(
            format!("[{}]", tag),
            theme.text_style().fg(theme.tag),
        ));
        spans.push(Span::raw(" "));
    }
    let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    spans.push(Span::styled(app.tags.input.clone(), theme.text_style()));
    frame.render_widget(Paragraph::new(Line::from(spans)), tags_area);

    if focused {
        let x = used + unicode::display_width(&app.tags.input);
        if x < tags_area.width as usize {
            frame.set_cursor_position(Position::new(tags_area.x + x as u16, tags_area.y));
        }
    }

    let suggestions = app.tags.visible_suggestions();
    let mut spans = vec![Span::raw("      ")];
    if suggestions.is_empty() {
        spans.push(Span::styled(
            "(enter or , to add, backspace to remove)",
            theme.hint_style(),
        ));
    } else {
        spans.push(Span::styled("suggestions: ", theme.hint_style()));
        for (i, s) in suggestions.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" \u{00B7} ", theme.hint_style()));
            }
            let style = if focused && app.tags.highlighted() == Some(i) {
                theme.selection_style()
            } else {
                theme.hint_style()
            };
            spans.push(Span::styled(s.to_string(), style));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), suggestions_area);
}
