mod check;
mod explain;
mod sdl;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use eyre::Result;
use explain::ExplainCommand;
use schemata_manifest::Manifest;
use sdl::SdlCommand;

use crate::{
    ops,
    reports::{FailureReport, Report, TerminalOutput},
};

/// Extension trait for exiting on manifest and compile errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for schemata_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for Result<T, FailureReport> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(failure) => {
                failure.render(&mut TerminalOutput::new());
                std::process::exit(1);
            }
        }
    }
}

/// Schema modules to compile.
#[derive(Args)]
pub struct SchemaArgs {
    /// Schema module files; the first one is the root module
    #[arg(short, long = "schema", value_name = "FILE", default_value = "schema.toml")]
    pub schemas: Vec<PathBuf>,
}

impl SchemaArgs {
    pub fn load(&self) -> Vec<Manifest> {
        ops::load(&self.schemas).unwrap_or_exit()
    }
}

#[derive(Parser)]
#[command(name = "schemata")]
#[command(version)]
#[command(about = "Compile TOML schema modules into GraphQL SDL")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Sdl(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile schema modules and print the SDL
    Sdl(SdlCommand),

    /// Compile schema modules without printing anything
    Check(CheckCommand),

    /// Show the pipeline phases and lints, and what they produce
    Explain(ExplainCommand),
}
