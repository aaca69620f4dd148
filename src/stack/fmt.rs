//! Formatting of the stack status report.

use super::{BranchName, BranchStatus, RemoteState};
use crate::constants::{AHEAD_MARKER, DIVERGED_MARKER, MEMBER_INDENT, SAME_MARKER};
use std::fmt::{self, Display};

/// The user-facing status report. Rendering is pure: identical inputs produce identical text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct StatusReport<'a> {
    /// The checked out branch.
    pub(crate) head: &'a BranchName,
    /// The name of the remote the stack was classified against, if any.
    pub(crate) remote: Option<&'a str>,
    /// The classified members of the current stack. Ignored for plain branches.
    pub(crate) status: &'a [BranchStatus],
}

impl RemoteState {
    /// Returns the marker shown in front of a member, [None] when unclassified.
    pub(crate) fn marker(self) -> Option<char> {
        match self {
            Self::Ahead => Some(AHEAD_MARKER),
            Self::Same => Some(SAME_MARKER),
            Self::Diverged => Some(DIVERGED_MARKER),
            Self::None => None,
        }
    }
}

impl Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let identity = match self.head {
            BranchName::Plain(label) => {
                return writeln!(f, "Not in a stack\nOn branch {}", label);
            }
            BranchName::Stacked(identity) => identity,
        };

        writeln!(f, "In stack {}", identity.stack)?;
        writeln!(f, "On branch {}", identity)?;
        if let Some(remote) = self.remote {
            writeln!(f, "Remote {}", remote)?;
        }

        let has_markers = self.status.iter().any(|s| s.state.marker().is_some());
        let legend = if has_markers {
            format!(
                " ({} ahead, {} same, {} diverged)",
                AHEAD_MARKER, SAME_MARKER, DIVERGED_MARKER
            )
        } else {
            String::new()
        };
        writeln!(f, "\nLocal Stack{}:", legend)?;

        for branch in self.status {
            match branch.state.marker() {
                Some(marker) => writeln!(f, "{}({}) {}", MEMBER_INDENT, marker, branch.id)?,
                None => writeln!(f, "{}{}", MEMBER_INDENT, branch.id)?,
            }
        }

        Ok(())
    }
}
