use ratatui::style::{Color, Modifier, Style};

/// Colors for the capture form, passed to every renderer
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub title: Color,
    pub label: Color,
    pub focused: Color,
    pub hint: Color,
    pub border: Color,
    pub focused_border: Color,
    pub tag: Color,
    pub success: Color,
    pub error: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    /// Catppuccin Mocha
    fn default() -> Self {
        Theme {
            text: Color::Rgb(0xCD, 0xD6, 0xF4),
            title: Color::Rgb(0xCB, 0xA6, 0xF7),
            label: Color::Rgb(0x89, 0xDC, 0xEB),
            focused: Color::Rgb(0xF9, 0xE2, 0xAF),
            hint: Color::Rgb(0x6C, 0x70, 0x86),
            border: Color::Rgb(0x45, 0x47, 0x5A),
            focused_border: Color::Rgb(0xCB, 0xA6, 0xF7),
            tag: Color::Rgb(0x89, 0xB4, 0xFA),
            success: Color::Rgb(0xA6, 0xE3, 0xA1),
            error: Color::Rgb(0xF3, 0x8B, 0xA8),
            selection_fg: Color::Rgb(0x1E, 0x1E, 0x2E),
            selection_bg: Color::Rgb(0xCB, 0xA6, 0xF7),
        }
    }
}

impl Theme {
    /// Terminal default colors only; emphasis comes from modifiers.
    pub fn plain() -> Self {
        Theme {
            text: Color::Reset,
            title: Color::Reset,
            label: Color::Reset,
            focused: Color::Reset,
            hint: Color::Reset,
            border: Color::Reset,
            focused_border: Color::Reset,
            tag: Color::Reset,
            success: Color::Reset,
            error: Color::Reset,
            selection_fg: Color::Reset,
            selection_bg: Color::Reset,
        }
    }

    /// The plain theme when `NO_COLOR` is set to anything non-empty.
    pub fn from_env() -> Self {
        match std::env::var_os("NO_COLOR") {
            Some(v) if !v.is_empty() => Theme::plain(),
            _ => Theme::default(),
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.hint)
    }

    pub fn label_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.label)
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focused_border)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(self.reverse_when_plain())
    }

    /// Without colors, reverse video is the only way to show a selection.
    fn reverse_when_plain(&self) -> Modifier {
        if self.selection_bg == Color::Reset {
            Modifier::REVERSED
        } else {
            Modifier::empty()
        }
    }
}
