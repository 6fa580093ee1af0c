use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{SchemaArgs, UnwrapOrExit};
use crate::{
    adapter::AdapterKind,
    ops,
    reports::{Report, SnapshotSummary, TerminalOutput},
};

#[derive(Args)]
pub struct SdlCommand {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Write the SDL to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How field and argument names are spelled
    #[arg(short, long, value_enum, default_value_t = AdapterKind::Camel)]
    pub adapter: AdapterKind,

    /// Write a JSON snapshot of the blueprint after each phase into this directory
    #[arg(long, value_name = "DIR")]
    pub visualize: Option<PathBuf>,
}

impl SdlCommand {
    /// Run the sdl command
    pub fn run(&self) -> Result<()> {
        let manifests = self.schema.load();

        let (pipeline, snapshots) = ops::snapshot_pipeline(self.visualize.as_deref());
        let blueprint = ops::compile(&manifests, &pipeline).unwrap_or_exit();

        let mut report = ops::sdl(&blueprint, self.adapter, self.output.as_deref())?;
        report.snapshots = self
            .visualize
            .clone()
            .zip(snapshots)
            .map(|(dir, plugin)| SnapshotSummary {
                dir,
                count: plugin.snapshots().len(),
            });

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
