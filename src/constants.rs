//! Constants for the `gitit` application.

/// Prefix of every local branch reference.
pub(crate) const REFS_HEADS: &str = "refs/heads/";

/// Name of the user configuration file, relative to the home directory.
pub(crate) const GITIT_CFG_FILE_NAME: &str = ".gitit.toml";

/// Remote preferred when the configuration does not name one.
pub(crate) const DEFAULT_REMOTE: &str = "origin";

/// Sequence number of the first branch in a freshly initialised stack.
pub(crate) const FIRST_SEQUENCE: u16 = 1;

/// Largest sequence number that still renders in three digits.
pub(crate) const MAX_SEQUENCE: u16 = 999;

pub(crate) const AHEAD_MARKER: char = '+';
pub(crate) const SAME_MARKER: char = '=';
pub(crate) const DIVERGED_MARKER: char = '∇';

/// Indentation of the member lines in the status report.
pub(crate) const MEMBER_INDENT: &str = "    ";
