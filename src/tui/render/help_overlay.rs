use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::theme::Theme;

/// Render the help overlay (F1, or ? outside the text areas)
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let overlay_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, overlay_area);

    let key_style = Style::default()
        .fg(theme.focused)
        .add_modifier(Modifier::BOLD);
    let desc_style = theme.text_style();
    let header_style = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" crumb - Help", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Navigation", header_style)));
    add_binding(
        &mut lines,
        " Tab / Shift+Tab",
        "Next / previous field",
        key_style,
        desc_style,
    );
    add_binding(
        &mut lines,
        " Ctrl+T",
        "Focus tool selector (also /)",
        key_style,
        desc_style,
    );
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Editing", header_style)));
    add_binding(
        &mut lines,
        " Ctrl+A / Ctrl+E",
        "Line start / end",
        key_style,
        desc_style,
    );
    add_binding(
        &mut lines,
        " Ctrl+U / Ctrl+K",
        "Delete to line start / end",
        key_style,
        desc_style,
    );
    add_binding(
        &mut lines,
        " Alt+\u{2190}/\u{2192}",
        "Word left / right",
        key_style,
        desc_style,
    );
    add_binding(
        &mut lines,
        " \u{2191}\u{2193} Enter",
        "Change tool / open list",
        key_style,
        desc_style,
    );
    add_binding(
        &mut lines,
        " Enter or ,",
        "Add tag",
        key_style,
        desc_style,
    );
    add_binding(
        &mut lines,
        " Backspace",
        "Remove last tag (empty input)",
        key_style,
        desc_style,
    );
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Other", header_style)));
    add_binding(
        &mut lines,
        " Ctrl+S",
        "Save",
        key_style,
        desc_style,
    );
    add_binding(
        &mut lines,
        " F1 / ?",
        "Show this help",
        key_style,
        desc_style,
    );
    add_binding(
        &mut lines,
        " Esc",
        "Cancel and exit",
        key_style,
        desc_style,
    );
    add_binding(
        &mut lines,
        " Ctrl+C / Ctrl+D",
        "Force quit",
        key_style,
        desc_style,
    );
    lines.push(Line::from(Span::styled(
        " In Prompt and Output, ? and / are typed as text",
        theme.hint_style(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Press any key to close",
        theme.hint_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 20;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
