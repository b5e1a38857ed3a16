mod init;
mod view;

pub use init::cmd_init;
pub use view::{cmd_view, format_entry};

use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::io::config_io;
use crate::io::entry_store::{INDEX_FILE, atomic_write};
use crate::model::Config;
use crate::ops::index;
use crate::tui::{self, CaptureSettings};

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.version {
        println!("crumb version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let work_dir = match cli.dir {
        Some(ref dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir.display(), e))?,
        None => std::env::current_dir()?,
    };

    match cli.command {
        None => cmd_capture(&work_dir, cli.tool, cli.title, cli.stay),
        Some(Commands::Init(args)) => cmd_init(args, &work_dir),
        Some(Commands::Readme) => cmd_readme(&work_dir),
        Some(Commands::Config) => cmd_config(),
        Some(Commands::View(args)) => cmd_view(&args, &work_dir),
    }
}

fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config = config_io::load_config()?;
    tracing::debug!(output_dir = %config.output_dir, tool = %config.default_tool, "config loaded");
    Ok(config)
}

// ---------------------------------------------------------------------------
// Capture
// ---------------------------------------------------------------------------

fn cmd_capture(
    work_dir: &Path,
    tool: Option<String>,
    title: Option<String>,
    stay: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let tools = config.all_tools();

    let tool = match tool.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        Some(t) => {
            if !config.is_known_tool(&t) {
                tracing::debug!(tool = %t, "tool is not in the known tools list");
                eprintln!("warning: tool '{}' is not in the known tools list", t);
                eprintln!("known tools: {}", tools.join(", "));
                eprintln!("continuing anyway...");
            }
            t
        }
        None => config.default_tool.clone(),
    };

    let settings = CaptureSettings {
        output_dir: config.output_path(work_dir),
        output_label: config.output_dir.clone(),
        work_dir: work_dir.to_path_buf(),
        tools,
        tool,
        favorite_tags: config.favorite_tags.clone(),
        title,
        stay_open: stay,
    };

    let outcome = tui::run(settings)?;
    tracing::debug!(reason = ?outcome.reason, saved = outcome.saved.len(), "capture finished");
    for path in &outcome.saved {
        println!("saved: {}", path.display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Readme
// ---------------------------------------------------------------------------

fn cmd_readme(work_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let dir = config.output_path(work_dir);

    let report = index::generate_index(&dir)?;
    for warning in &report.warnings {
        eprintln!("warning: {}", warning);
    }

    let readme: PathBuf = dir.join(INDEX_FILE);
    atomic_write(&readme, report.markdown.as_bytes())
        .map_err(|e| format!("failed to write {}: {}", readme.display(), e))?;
    tracing::debug!(rows = report.rows, "index written");
    println!("generated: {}", readme.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config() -> Result<(), Box<dyn std::error::Error>> {
    let path = config_io::config_path()?;
    if config_io::ensure_config_file(&path)? {
        println!("created: {}", path.display());
    }
    config_io::open_in_editor(&path)?;
    Ok(())
}
