use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "crumb",
    about = concat!(
        "crumb v",
        env!("CARGO_PKG_VERSION"),
        " - leave a trail of the prompts that worked"
    ),
    disable_version_flag = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Tool to pre-select for this session
    #[arg(short = 't', long)]
    pub tool: Option<String>,

    /// Title for the saved entry instead of one derived from the prompt
    #[arg(long)]
    pub title: Option<String>,

    /// Keep the form open after saving to capture several prompts
    #[arg(long)]
    pub stay: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    pub version: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the output directory with a starter README
    Init(InitArgs),
    /// Regenerate the README index of captured prompts
    Readme,
    /// Open the config file in $EDITOR
    Config,
    /// View a captured prompt: crumb <file.md>
    #[command(external_subcommand)]
    View(Vec<String>),
}

#[derive(Args)]
pub struct InitArgs {
    /// Replace an existing README
    #[arg(long)]
    pub force: bool,
}
