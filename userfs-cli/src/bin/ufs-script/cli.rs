use clap::Parser;
use std::path::PathBuf;

/// Run a userfs command script against a fresh in-memory engine
#[derive(Parser)]
pub struct Cli {
    /// Script file, one command per line; stdin when omitted
    #[arg(long, short)]
    pub script: Option<PathBuf>,

    /// Print each command before its result
    #[arg(long, short)]
    pub echo: bool,
}
