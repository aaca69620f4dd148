//! `init` subcommand.

use crate::{
    ctx::StContext,
    errors::{StError, StResult},
};
use clap::Args;
use nu_ansi_term::Color;

/// CLI arguments for the `init` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct InitCmd {
    /// The new stack and the label of its first branch, as `<stack>/<label>`.
    #[clap(index = 1, value_name = "STACK/LABEL")]
    name: Option<String>,
}

impl InitCmd {
    /// Run the `init` subcommand.
    pub fn run(self, ctx: StContext<'_>) -> StResult<()> {
        let name = self.name.ok_or(StError::MissingArgument("<stack>/<label>"))?;
        let identity = ctx.init_stack(&name)?;

        println!(
            "Started stack `{}` on branch `{}`.",
            Color::Green.paint(&identity.stack),
            Color::Blue.paint(identity.branch_name())
        );
        Ok(())
    }
}
