//! `push` subcommand.

use crate::{ctx::StContext, errors::StResult};
use clap::Args;
use nu_ansi_term::Color;

/// CLI arguments for the `push` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct PushCmd {
    /// Force-update the remote branches.
    #[clap(short, long)]
    force: bool,
}

impl PushCmd {
    /// Run the `push` subcommand.
    pub fn run(self, ctx: StContext<'_>) -> StResult<()> {
        let (remote, pushed) = ctx.push_stack(self.force)?;

        for identity in pushed {
            println!(
                "Pushed `{}` to `{}`.",
                Color::Blue.paint(identity.branch_name()),
                Color::Green.paint(&remote)
            );
        }
        Ok(())
    }
}
