use std::path::PathBuf;

use clap::Parser;

/// Replay a JSON-lines session script through the presentation coordinator.
#[derive(Parser, Debug)]
#[command(name = "huddle-replay", version, about)]
pub struct Args {
    /// Script file with one event or pause step per line. Reads stdin when
    /// omitted.
    pub script: Option<PathBuf>,

    /// Id of the local participant.
    #[arg(long)]
    pub local: String,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. `huddle=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
