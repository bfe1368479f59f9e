use std::path::PathBuf;

use clap::Parser;

/// jsedit, a desktop JSON editor.
#[derive(Parser, Debug)]
#[command(name = "jsedit", version, about)]
pub struct Args {
    /// JSON file to open once the editor is ready.
    pub file: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
