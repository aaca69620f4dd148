//! Subcommands pertaining to stack management.

mod init;
pub use init::InitCmd;

mod branch;
pub use branch::BranchCmd;

mod checkout;
pub use checkout::CheckoutCmd;

mod status;
pub use status::StatusCmd;
