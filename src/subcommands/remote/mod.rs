//! Subcommands pertaining to remote stack management.

mod push;
pub use push::PushCmd;
