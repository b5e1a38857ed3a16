use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::io::entry_store::{INDEX_FILE, atomic_write};
use crate::ops::index::render_index;

/// Create the output directory and a starter README listing no entries.
///
/// An existing README is left alone unless `--force` is given.
pub fn cmd_init(args: InitArgs, work_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config()?;
    let dir = config.output_path(work_dir);
    fs::create_dir_all(&dir)
        .map_err(|e| format!("failed to create {}: {}", dir.display(), e))?;
    println!("initialized: {}", dir.display());

    let readme = dir.join(INDEX_FILE);
    if readme.exists() && !args.force {
        println!(
            "kept: {} (use --force to replace it)",
            readme.display()
        );
        return Ok(());
    }

    atomic_write(&readme, render_index(&[]).as_bytes())
        .map_err(|e| format!("failed to write {}: {}", readme.display(), e))?;
    println!("created: {}", readme.display());
    Ok(())
}
