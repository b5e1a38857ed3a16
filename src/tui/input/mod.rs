mod save;

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, ExitReason, Field, Toast, ToastKind};

pub const INFO_TOAST: Duration = Duration::from_secs(2);
pub const ERROR_TOAST: Duration = Duration::from_secs(3);
pub const QUIT_DELAY: Duration = Duration::from_millis(500);

/// Inputs to the form: terminal events plus timers it scheduled earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    HideToast(u64),
    QuitTimer,
}

/// Work the driver must schedule on the form's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    HideToastAfter { delay: Duration, generation: u64 },
    QuitAfter(Duration),
}

/// Apply one event to the form
pub fn handle_event(app: &mut App, event: AppEvent) -> Vec<Effect> {
    let effects = match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Paste(text) => {
            handle_paste(app, &text);
            Vec::new()
        }
        AppEvent::Resize(w, h) => {
            app.width = w;
            app.height = h;
            Vec::new()
        }
        AppEvent::HideToast(generation) => {
            if generation == app.toast_generation {
                app.toast = None;
            }
            Vec::new()
        }
        AppEvent::QuitTimer => {
            if app.quitting {
                app.exit = Some(ExitReason::Saved);
            }
            Vec::new()
        }
    };
    app.sync_scroll();
    effects
}

fn handle_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return Vec::new();
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d')) {
        app.exit = Some(ExitReason::Interrupted);
        return Vec::new();
    }

    if app.quitting {
        return Vec::new();
    }

    if app.show_help {
        app.show_help = false;
        return Vec::new();
    }

    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    let shortcuts_typed = !app.focus.is_text_area();

    match key.code {
        KeyCode::Esc => {
            app.exit = Some(ExitReason::Cancelled);
        }
        KeyCode::Tab => focus(app, app.focus.next()),
        KeyCode::BackTab => focus(app, app.focus.prev()),
        KeyCode::Char('s') if ctrl => return save::save(app),
        KeyCode::Char('t') if ctrl => focus(app, Field::Tool),
        KeyCode::F(1) => app.show_help = true,
        KeyCode::Char('?') if plain && shortcuts_typed => app.show_help = true,
        KeyCode::Char('/') if plain && shortcuts_typed => focus(app, Field::Tool),
        _ => {
            route_to_field(app, key);
        }
    }
    Vec::new()
}

fn focus(app: &mut App, field: Field) {
    if app.focus == Field::Tool && field != Field::Tool {
        app.tool.open = false;
    }
    app.focus = field;
}

fn route_to_field(app: &mut App, key: KeyEvent) -> bool {
    match app.focus {
        Field::Prompt => app.prompt.handle_key(key),
        Field::Output => app.output.handle_key(key),
        Field::Tool => app.tool.handle_key(key),
        Field::Tags => app.tags.handle_key(key),
    }
}

/// Bracketed paste goes to the focused field as a single insertion.
fn handle_paste(app: &mut App, text: &str) {
    if app.quitting || app.show_help || text.is_empty() {
        return;
    }
    match app.focus {
        Field::Prompt => {
            app.prompt.insert_str(text);
        }
        Field::Output => {
            app.output.insert_str(text);
        }
        Field::Tags => app.tags.paste(text),
        Field::Tool => {}
    }
}

/// Show a toast and return the timer that hides it.
pub(super) fn show_toast(app: &mut App, message: String, kind: ToastKind) -> Effect {
    app.toast_generation += 1;
    app.toast = Some(Toast { message, kind });
    let delay = match kind {
        ToastKind::Info => INFO_TOAST,
        ToastKind::Error => ERROR_TOAST,
    };
    Effect::HideToastAfter {
        delay,
        generation: app.toast_generation,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use chrono::{DateTime, FixedOffset};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::model::Config;
    use crate::tui::app::{App, CaptureSettings};

    use super::{AppEvent, Effect, handle_event};

    pub fn fixed_now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-15T10:30:00+02:00").unwrap()
    }

    pub fn fixed_author(_: &Path) -> String {
        "Ada Lovelace".to_string()
    }

    pub fn settings(dir: &Path) -> CaptureSettings {
        let config = Config::default();
        CaptureSettings {
            output_dir: dir.join("crumbs"),
            output_label: config.output_dir.clone(),
            work_dir: dir.to_path_buf(),
            tools: config.all_tools(),
            tool: config.default_tool.clone(),
            favorite_tags: vec!["rust".into()],
            title: None,
            stay_open: false,
        }
    }

    pub fn app_in(dir: &Path) -> App {
        app_with(settings(dir))
    }

    pub fn app_with(settings: CaptureSettings) -> App {
        let mut app = App::new(settings);
        app.clock = fixed_now;
        app.author = fixed_author;
        handle_event(&mut app, AppEvent::Resize(80, 30));
        app
    }

    pub fn key(app: &mut App, code: KeyCode) -> Vec<Effect> {
        handle_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    pub fn ctrl(app: &mut App, c: char) -> Vec<Effect> {
        handle_event(
            app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)),
        )
    }

    pub fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            key(app, code);
        }
    }
}
