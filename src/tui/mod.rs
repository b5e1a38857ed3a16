pub mod app;
pub mod fields;
pub mod input;
pub mod layout;
pub mod render;
pub mod theme;

pub use app::{CaptureSettings, ExitReason, Outcome, run};
