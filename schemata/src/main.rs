mod adapter;
mod commands;
mod ops;
mod reports;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::filter::LevelFilter;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.run()
}

/// Log to stderr so SDL on stdout stays clean.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
