use clap::Args;
use eyre::Result;

use super::{SchemaArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    #[command(flatten)]
    pub schema: SchemaArgs,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let manifests = self.schema.load();
        let report = ops::explain(&manifests, &self.schema.schemas).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
