//! `branch` subcommand.

use crate::{
    ctx::StContext,
    errors::{StError, StResult},
};
use clap::Args;
use nu_ansi_term::Color;

/// CLI arguments for the `branch` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct BranchCmd {
    /// Label of the new branch. The sequence number is allocated automatically.
    #[clap(index = 1)]
    label: Option<String>,
}

impl BranchCmd {
    /// Run the `branch` subcommand.
    pub fn run(self, ctx: StContext<'_>) -> StResult<()> {
        let label = self.label.ok_or(StError::MissingArgument("<label>"))?;
        let identity = ctx.grow_stack(&label)?;

        println!(
            "Created and checked out `{}`.",
            Color::Blue.paint(identity.branch_name())
        );
        Ok(())
    }
}
