//! `checkout` subcommand.

use crate::{
    ctx::StContext,
    errors::{StError, StResult},
    stack::StackMember,
};
use clap::Args;
use std::fmt::{self, Display};

/// CLI arguments for the `checkout` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct CheckoutCmd {
    /// Prefix of the `<NNN>_<label>` segment of the branch to checkout.
    #[clap(index = 1)]
    short_id: Option<String>,
    /// Select the branch from the current stack interactively.
    #[clap(short, long, conflicts_with = "short_id")]
    interactive: bool,
}

impl CheckoutCmd {
    /// Run the `checkout` subcommand.
    pub fn run(self, ctx: StContext<'_>) -> StResult<()> {
        if self.interactive {
            return Self::select(ctx);
        }

        let short_id = self
            .short_id
            .filter(|id| !id.is_empty())
            .ok_or(StError::MissingArgument("<short-id>"))?;
        ctx.checkout_short_id(&short_id)?;
        Ok(())
    }

    /// Prompts for a member of the current stack and checks it out.
    fn select(ctx: StContext<'_>) -> StResult<()> {
        let (head, members) = ctx.require_stack(false)?;
        let options = members
            .into_iter()
            .map(|member| DisplayMember {
                checked_out: member.identity == head,
                member,
            })
            .collect::<Vec<_>>();

        let selected = inquire::Select::new("Select a branch to checkout", options)
            .with_formatter(&|f| f.value.member.identity.branch_name())
            .prompt()?;
        ctx.checkout_member(&selected.member)?;
        Ok(())
    }
}

/// A stack member as shown in the interactive prompt.
struct DisplayMember {
    /// Whether the member is the checked out branch.
    checked_out: bool,
    /// The member.
    member: StackMember,
}

impl Display for DisplayMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.checked_out { '*' } else { ' ' };
        write!(f, "{} {}", marker, self.member.identity.id())
    }
}
