//! The subcommands for the `gitit` application.

use crate::{ctx::StContext, errors::StResult};
use clap::Subcommand;

mod remote;
mod stack;

use remote::PushCmd;
use stack::{BranchCmd, CheckoutCmd, InitCmd, StatusCmd};

#[derive(Debug, Clone, Eq, PartialEq, Subcommand)]
pub enum Subcommands {
    /// Start a new stack, creating `<stack>/001_<label>` on top of the current commit.
    Init(InitCmd),
    /// Create the next branch of the current stack on top of the current commit.
    #[clap(alias = "b")]
    Branch(BranchCmd),
    /// Checkout a branch of the current stack by its short id, e.g. `002` for `002_api`.
    #[clap(alias = "co")]
    Checkout(CheckoutCmd),
    /// Show the current stack and how each branch compares to the remote.
    #[clap(alias = "st")]
    Status(StatusCmd),
    /// Push every branch of the current stack to the remote.
    Push(PushCmd),
}

impl Subcommands {
    /// Run the subcommand with the given context.
    pub async fn run(self, ctx: StContext<'_>) -> StResult<()> {
        match self {
            Self::Init(args) => args.run(ctx),
            Self::Branch(args) => args.run(ctx),
            Self::Checkout(args) => args.run(ctx),
            Self::Status(args) => args.run(ctx),
            Self::Push(args) => args.run(ctx),
        }
    }
}
