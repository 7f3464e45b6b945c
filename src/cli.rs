use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Append log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Price and on-chain snapshot (scan_output.csv)
    Market,
    /// On-chain holder and transfer metrics (onchain_output.csv)
    Onchain,
    /// GitHub developer activity (dev_output.csv)
    Dev,
    /// Every collector in turn
    All,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::All)
    }
}
