use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, FixedOffset, Local};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::entry_store::EntryStore;
use crate::io::git;
use crate::ops::tags::merge_suggestions;

use super::fields::{TagInput, TextArea, ToolSelect};
use super::input::{self, AppEvent, Effect};
use super::layout::field_heights;
use super::render;
use super::theme::Theme;

pub const PROMPT_MAX_CHARS: usize = 10_000;
pub const OUTPUT_MAX_CHARS: usize = 50_000;

/// Frequent tags offered after the configured favorites
pub const FREQUENT_TAG_SUGGESTIONS: usize = 10;

/// Longest the driver waits for input before checking timers
const MAX_POLL: Duration = Duration::from_millis(250);

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Prompt,
    Output,
    Tool,
    Tags,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Prompt, Field::Output, Field::Tool, Field::Tags];

    pub fn index(self) -> usize {
        match self {
            Field::Prompt => 0,
            Field::Output => 1,
            Field::Tool => 2,
            Field::Tags => 3,
        }
    }

    pub fn next(self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    pub fn prev(self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }

    pub fn is_text_area(self) -> bool {
        matches!(self, Field::Prompt | Field::Output)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// Why the form closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Saved,
    Cancelled,
    Interrupted,
}

/// What the caller learns once the form has closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reason: ExitReason,
    pub saved: Vec<PathBuf>,
}

/// Everything a capture session is started with.
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    /// Where entries are written (absolute)
    pub output_dir: PathBuf,
    /// The output directory as configured, shown in the header
    pub output_label: String,
    /// Directory git is asked for the author name
    pub work_dir: PathBuf,
    pub tools: Vec<String>,
    pub tool: String,
    pub favorite_tags: Vec<String>,
    /// Title for the next save instead of one derived from the prompt
    pub title: Option<String>,
    pub stay_open: bool,
}

/// Capture form state
pub struct App {
    pub settings: CaptureSettings,
    pub store: EntryStore,
    pub focus: Field,
    pub prompt: TextArea,
    pub output: TextArea,
    pub tool: ToolSelect,
    pub tags: TagInput,
    pub toast: Option<Toast>,
    /// Bumped on every toast so stale hide timers are ignored
    pub toast_generation: u64,
    pub show_help: bool,
    pub width: u16,
    pub height: u16,
    /// Consumed by the first successful save
    pub title_override: Option<String>,
    /// Set once a save succeeded and the form is about to close
    pub quitting: bool,
    pub exit: Option<ExitReason>,
    pub saved: Vec<PathBuf>,
    pub clock: fn() -> DateTime<FixedOffset>,
    pub author: fn(&Path) -> String,
}

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

impl App {
    pub fn new(settings: CaptureSettings) -> Self {
        let store = EntryStore::new(&settings.output_dir);
        let tool = ToolSelect::new(settings.tools.clone(), &settings.tool);
        let mut app = App {
            title_override: settings.title.clone(),
            store,
            focus: Field::Prompt,
            prompt: TextArea::new(PROMPT_MAX_CHARS),
            output: TextArea::new(OUTPUT_MAX_CHARS),
            tool,
            tags: TagInput::default(),
            toast: None,
            toast_generation: 0,
            show_help: false,
            width: 80,
            height: 24,
            quitting: false,
            exit: None,
            saved: Vec::new(),
            clock: local_now,
            author: git::author,
            settings,
        };
        app.refresh_tag_suggestions();
        app
    }

    /// Favorites first, then the most used tags in the store.
    pub fn refresh_tag_suggestions(&mut self) {
        let frequent = self.store.frequent_tags(FREQUENT_TAG_SUGGESTIONS);
        let merged = merge_suggestions(&self.settings.favorite_tags, &frequent);
        self.tags.set_suggestions(merged);
    }

    /// Inner heights of the prompt and output areas for the current size.
    pub fn field_heights(&self) -> (u16, u16) {
        field_heights(self.height)
    }

    /// Re-clamp text-area scroll offsets to the current layout.
    pub fn sync_scroll(&mut self) {
        let (prompt_h, output_h) = self.field_heights();
        self.prompt.clamp_scroll(prompt_h as usize);
        self.output.clamp_scroll(output_h as usize);
    }

    /// Empty the prompt, output and tags for the next capture. The tool
    /// selection is left as it is.
    pub fn reset_fields(&mut self) {
        self.prompt.clear();
        self.output.clear();
        self.tags.reset();
        self.tool.open = false;
        self.focus = Field::Prompt;
        self.refresh_tag_suggestions();
    }

    pub fn outcome(&self) -> Outcome {
        Outcome {
            reason: self.exit.unwrap_or(ExitReason::Cancelled),
            saved: self.saved.clone(),
        }
    }
}

/// Run the capture form until it closes
pub fn run(settings: CaptureSettings) -> Result<Outcome, Box<dyn std::error::Error>> {
    let theme = Theme::from_env();
    let mut app = App::new(settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &theme);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result.map(|_| app.outcome())
}

/// Timers scheduled by the reducer, fired in deadline order.
#[derive(Default)]
struct Timers {
    pending: Vec<(Instant, AppEvent)>,
}

impl Timers {
    fn schedule(&mut self, effects: Vec<Effect>) {
        let now = Instant::now();
        for effect in effects {
            let (delay, event) = match effect {
                Effect::HideToastAfter { delay, generation } => {
                    (delay, AppEvent::HideToast(generation))
                }
                Effect::QuitAfter(delay) => (delay, AppEvent::QuitTimer),
            };
            self.pending.push((now + delay, event));
        }
    }

    /// Remove and return the earliest timer that is due.
    fn pop_due(&mut self, now: Instant) -> Option<AppEvent> {
        let (i, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (at, _))| *at <= now)
            .min_by_key(|(_, (at, _))| *at)?;
        Some(self.pending.remove(i).1)
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        self.pending
            .iter()
            .map(|(at, _)| at.saturating_duration_since(now))
            .min()
            .map_or(MAX_POLL, |d| d.min(MAX_POLL))
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    theme: &Theme,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut timers = Timers::default();
    let size = terminal.size()?;
    timers.schedule(input::handle_event(
        app,
        AppEvent::Resize(size.width, size.height),
    ));

    loop {
        terminal.draw(|frame| render::render(frame, app, theme))?;
        if app.exit.is_some() {
            break;
        }

        if let Some(due) = timers.pop_due(Instant::now()) {
            timers.schedule(input::handle_event(app, due));
            continue;
        }

        if !event::poll(timers.poll_timeout(Instant::now()))? {
            continue;
        }
        let ev = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            Event::Paste(text) => AppEvent::Paste(text),
            Event::Resize(w, h) => AppEvent::Resize(w, h),
            _ => continue,
        };
        timers.schedule(input::handle_event(app, ev));
    }
    Ok(())
}
