use clap::Args;
use eyre::Result;

use super::{SchemaArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub schema: SchemaArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifests = self.schema.load();
        let report = ops::check(&manifests, &self.schema.schemas).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
