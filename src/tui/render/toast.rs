use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, ToastKind};
use crate::tui::theme::Theme;
use crate::util::unicode;

/// Render the toast row (empty when no toast is showing)
pub fn render_toast(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };
    let (symbol, color) = match toast.kind {
        ToastKind::Info => ("\u{2713}", theme.success),
        ToastKind::Error => ("\u{2717}", theme.error),
    };
    let text = format!("{} {}", symbol, toast.message);
    let text = unicode::truncate_to_width(&text, area.width as usize);
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(Span::styled(text, style)), area);
}
