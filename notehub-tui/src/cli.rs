//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "notehub-tui")]
#[command(about = "Browse, search, and create NoteHub notes from the terminal")]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, env = "NOTEHUB_TUI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Initial tag filter ("all" or a tag name, any case)
    #[arg(long)]
    pub tag: Option<String>,
}
