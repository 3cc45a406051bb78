use std::path::PathBuf;

use clap::Parser;

/// iCalendar to Org-mode agenda converter.
#[derive(Parser)]
#[command(
    name = "ics2org",
    version,
    about = "Convert an iCalendar export into an Org-mode agenda"
)]
pub struct Cli {
    /// Calendar file to read (defaults to stdin).
    pub input: Option<PathBuf>,

    /// Agenda file to write (defaults to stdout).
    pub output: Option<PathBuf>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
