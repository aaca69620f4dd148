//! `status` subcommand.

use crate::{
    ctx::StContext,
    errors::{StError, StResult},
};
use clap::Args;
use std::io::{self, Write};

/// CLI arguments for the `status` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct StatusCmd {
    /// Do not contact the remote; the report carries no remote markers.
    #[clap(long)]
    offline: bool,
}

impl StatusCmd {
    /// Run the `status` subcommand.
    pub fn run(self, ctx: StContext<'_>) -> StResult<()> {
        let report = ctx.status_report(!self.offline)?;

        let mut stdout = io::stdout().lock();
        stdout
            .write_all(report.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(StError::OutputFailure)
    }
}
