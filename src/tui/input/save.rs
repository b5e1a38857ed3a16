use crate::model::entry::{Entry, validate_prompt};
use crate::ops::derive::{generate_filename, generate_title, normalize_title};
use crate::parse::serialize_entry;
use crate::tui::app::{App, ToastKind};

use super::{Effect, QUIT_DELAY, show_toast};

/// Validate, render and persist the form as a new entry.
pub(super) fn save(app: &mut App) -> Vec<Effect> {
    let prompt = app.prompt.text();
    if let Err(e) = validate_prompt(&prompt) {
        return vec![show_toast(app, e.to_string(), ToastKind::Error)];
    }

    // a token still in the tag input counts, as if Enter had been pressed
    if !app.tags.input.trim().is_empty() {
        app.tags.commit();
    }

    let title = app
        .title_override
        .as_deref()
        .map(normalize_title)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| generate_title(&prompt));
    let date = (app.clock)();
    let entry = Entry {
        title,
        date,
        author: (app.author)(&app.settings.work_dir),
        tool: app.tool.selected().to_string(),
        tags: app.tags.tags().to_vec(),
        prompt,
        output: app.output.text(),
    };
    let filename = generate_filename(&entry.title, date.date_naive());

    let path = match app.store.save(&filename, &serialize_entry(&entry)) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(error = %e, "save failed");
            return vec![show_toast(app, format!("Error: {}", e), ToastKind::Error)];
        }
    };

    let message = format!("Saved: {}", path.display());
    app.saved.push(path);
    app.title_override = None;

    if app.settings.stay_open {
        app.reset_fields();
        vec![show_toast(app, message, ToastKind::Info)]
    } else {
        app.quitting = true;
        vec![
            show_toast(app, message, ToastKind::Info),
            Effect::QuitAfter(QUIT_DELAY),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crossterm::event::KeyCode;
    use tempfile::TempDir;

    use super::super::test_support::*;
    use super::super::{AppEvent, ERROR_TOAST, INFO_TOAST, handle_event};
    use crate::tui::app::{ExitReason, Field, ToastKind};

    use super::*;

    fn entry_files(dir: &std::path::Path) -> Vec<String> {
        let Ok(read) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = read
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn blank_prompt_shows_error_and_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(tmp.path());
        type_str(&mut app, "   \n  ");
        let effects = ctrl(&mut app, 's');

        let toast = app.toast.clone().unwrap();
        assert_eq!(toast.message, "Prompt is required");
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(
            effects,
            vec![Effect::HideToastAfter {
                delay: ERROR_TOAST,
                generation: app.toast_generation
            }]
        );
        assert!(!tmp.path().join("crumbs").exists());
        assert!(app.exit.is_none());
        assert!(!app.quitting);
    }

    #[test]
    fn save_writes_entry_and_schedules_quit() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(tmp.path());
        type_str(&mut app, "Fix the bug!");
        key(&mut app, KeyCode::Tab);
        type_str(&mut app, "It was a typo.");
        key(&mut app, KeyCode::Tab);
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Tab);
        type_str(&mut app, "debugging,");

        let effects = ctrl(&mut app, 's');
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[1], Effect::QuitAfter(QUIT_DELAY));
        assert!(app.quitting);

        let dir = tmp.path().join("crumbs");
        assert_eq!(entry_files(&dir), vec!["2024-01-15-fix-the-bug.md"]);
        let content = fs::read_to_string(dir.join("2024-01-15-fix-the-bug.md")).unwrap();
        assert_eq!(
            content,
            "---\ntitle: Fix the bug!\ndate: 2024-01-15T10:30:00+02:00\nauthor: Ada Lovelace\n\
             tool: Cursor\ntags:\n  - debugging\n---\n\n## Prompt\n\nFix the bug!\n\n\
             ## Output\n\nIt was a typo.\n"
        );

        let toast = app.toast.clone().unwrap();
        assert_eq!(toast.kind, ToastKind::Info);
        assert!(toast.message.starts_with("Saved: "));
        assert!(toast.message.ends_with("2024-01-15-fix-the-bug.md"));

        // keys are ignored while the form is closing
        type_str(&mut app, "x");
        assert!(app.exit.is_none());
        handle_event(&mut app, AppEvent::QuitTimer);
        assert_eq!(app.exit, Some(ExitReason::Saved));
        assert_eq!(app.outcome().saved.len(), 1);
    }

    #[test]
    fn uncommitted_tag_is_saved() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(tmp.path());
        type_str(&mut app, "Fix the bug");
        key(&mut app, KeyCode::BackTab);
        type_str(&mut app, "design,debugging");
        ctrl(&mut app, 's');

        let content =
            fs::read_to_string(tmp.path().join("crumbs/2024-01-15-fix-the-bug.md")).unwrap();
        assert!(content.contains("tags:\n  - design\n  - debugging\n---\n"));
    }

    #[test]
    fn blank_tag_input_adds_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(tmp.path());
        type_str(&mut app, "Fix the bug");
        key(&mut app, KeyCode::BackTab);
        type_str(&mut app, "design,   ");
        ctrl(&mut app, 's');

        let content =
            fs::read_to_string(tmp.path().join("crumbs/2024-01-15-fix-the-bug.md")).unwrap();
        assert!(content.contains("tags:\n  - design\n---\n"));
    }

    #[test]
    fn stay_open_resets_fields_but_keeps_tool() {
        let tmp = TempDir::new().unwrap();
        let mut s = settings(tmp.path());
        s.stay_open = true;
        let mut app = app_with(s);

        type_str(&mut app, "First prompt");
        key(&mut app, KeyCode::Tab);
        type_str(&mut app, "output");
        key(&mut app, KeyCode::Tab);
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Tab);
        type_str(&mut app, "design,half");

        let effects = ctrl(&mut app, 's');
        assert_eq!(
            effects,
            vec![Effect::HideToastAfter {
                delay: INFO_TOAST,
                generation: app.toast_generation
            }]
        );
        assert!(app.exit.is_none());
        assert!(!app.quitting);
        assert_eq!(app.focus, Field::Prompt);
        assert_eq!(app.prompt.text(), "");
        assert_eq!(app.output.text(), "");
        assert!(app.tags.tags().is_empty());
        assert!(app.tags.input.is_empty());
        assert_eq!(app.tool.selected(), "Cursor");
        // the saved tags now show up after the favorites
        assert_eq!(app.tags.visible_suggestions(), ["rust", "design", "half"]);

        type_str(&mut app, "First prompt");
        ctrl(&mut app, 's');
        assert_eq!(
            entry_files(&tmp.path().join("crumbs")),
            vec!["2024-01-15-first-prompt-2.md", "2024-01-15-first-prompt.md"]
        );
        assert_eq!(app.saved.len(), 2);
    }

    #[test]
    fn title_override_is_used_once() {
        let tmp = TempDir::new().unwrap();
        let mut s = settings(tmp.path());
        s.stay_open = true;
        s.title = Some("  Custom   Title ".into());
        let mut app = app_with(s);

        type_str(&mut app, "some prompt");
        ctrl(&mut app, 's');
        type_str(&mut app, "another prompt");
        ctrl(&mut app, 's');

        assert_eq!(
            entry_files(&tmp.path().join("crumbs")),
            vec!["2024-01-15-another-prompt.md", "2024-01-15-custom-title.md"]
        );
        let content =
            fs::read_to_string(tmp.path().join("crumbs/2024-01-15-custom-title.md")).unwrap();
        assert!(content.contains("title: Custom Title\n"));
    }

    #[test]
    fn store_failure_keeps_form_intact() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("crumbs"), "a file, not a directory").unwrap();
        let mut app = app_in(tmp.path());
        type_str(&mut app, "keep me");
        ctrl(&mut app, 's');

        let toast = app.toast.clone().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(toast.message.starts_with("Error: "));
        assert_eq!(app.prompt.text(), "keep me");
        assert!(!app.quitting);
        assert!(app.saved.is_empty());
    }
}
