//! kin-monitor: answer reliability dashboard for Naver KiN exports.
//!
//! Every subcommand prints JSON on stdout; logs go to stderr.

mod commands;
mod nav;
mod state;
mod views;

use clap::Parser;
use commands::Command;
use kin_core::config::MonitorConfig;
use state::Session;
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "kin-monitor")]
#[command(about = "KiN answer reliability dashboard", long_about = None)]
struct Cli {
    /// Q&A export to read (overrides the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = MonitorConfig::discover(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    info!(data = %config.data_path.display(), "opening dataset");

    let mut session = Session::open(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&mut session, cli.command, cli.pretty, &mut out)
}
