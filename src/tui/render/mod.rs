pub mod form;
pub mod help_overlay;
pub mod toast;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::util::unicode;

use super::app::App;
use super::theme::Theme;

/// Screen regions of the form, top to bottom
pub(super) struct FormLayout {
    pub header: Rect,
    pub prompt: Rect,
    pub output: Rect,
    pub tool: Rect,
    pub tags: Rect,
    pub suggestions: Rect,
    pub footer: Rect,
    pub toast: Rect,
}

impl FormLayout {
    pub fn new(area: Rect, app: &App) -> Self {
        let (prompt_h, output_h) = app.field_heights();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),            // header
                Constraint::Length(1),            //
                Constraint::Length(prompt_h + 2), // prompt (bordered)
                Constraint::Length(output_h + 2), // output (bordered)
                Constraint::Length(1),            //
                Constraint::Length(1),            // tool
                Constraint::Length(1),            //
                Constraint::Length(1),            // tags
                Constraint::Length(1),            // suggestions
                Constraint::Length(1),            //
                Constraint::Length(1),            // footer
                Constraint::Length(1),            //
                Constraint::Length(1),            // toast
                Constraint::Min(0),
            ])
            .split(area);
        FormLayout {
            header: chunks[0],
            prompt: chunks[2],
            output: chunks[3],
            tool: chunks[5],
            tags: chunks[7],
            suggestions: chunks[8],
            footer: chunks[10],
            toast: chunks[12],
        }
    }
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let layout = FormLayout::new(area, app);

    render_header(frame, app, theme, layout.header);
    form::render_text_areas(frame, app, theme, &layout);
    form::render_tool_row(frame, app, theme, layout.tool);
    form::render_tag_rows(frame, app, theme, layout.tags, layout.suggestions);
    render_footer(frame, theme, layout.footer);
    toast::render_toast(frame, app, theme, layout.toast);

    // Popups are drawn over the form
    if app.tool.open {
        form::render_tool_list(frame, app, theme, layout.tool, area);
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, theme, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let label = app.settings.output_label.trim_end_matches('/');
    let line = Line::from(vec![
        Span::styled(
            "crumb",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  \u{2192} {}/", label), theme.hint_style()),
        Span::styled("  \u{00B7}  ", theme.hint_style()),
        Span::styled(app.tool.selected().to_string(), theme.text_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

const FOOTER_HINTS: &str =
    "Tab: next \u{2022} Shift+Tab: prev \u{2022} Ctrl+S: save \u{2022} Ctrl+T: tool \u{2022} F1: help \u{2022} Esc: cancel";

fn render_footer(frame: &mut Frame, theme: &Theme, area: Rect) {
    let text = unicode::truncate_to_width(FOOTER_HINTS, area.width as usize);
    frame.render_widget(Paragraph::new(Span::styled(text, theme.hint_style())), area);
}
