//! The stack topology and status engine.
//!
//! Stacks are not persisted anywhere: a stack is the set of local branches named
//! `<stack>/<NNN>_<label>`, ordered by their zero-padded sequence number `NNN`. Everything in
//! this module is pure; the repository is consulted by [StContext] and the results are handed
//! in as plain data.
//!
//! [StContext]: crate::ctx::StContext

use std::collections::BTreeMap;

mod fmt;
pub(crate) use fmt::StatusReport;

mod refname;
pub(crate) use refname::stack_prefix;

mod resolve;
pub(crate) use resolve::{current_stack, next_branch, resolve_short_id};

mod sequence;
pub(crate) use sequence::{init_identity, next_sequence};

mod status;
pub(crate) use status::classify;

/// The identity of a branch within a stack, parsed from `refs/heads/<stack>/<NNN>_<label>`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct StackIdentity {
    /// The name of the stack.
    pub stack: String,
    /// The position of the branch within the stack, `0..=999`.
    pub sequence: u16,
    /// The free-form label following the sequence number.
    pub label: String,
}

/// A parsed local branch name.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BranchName {
    /// A branch that belongs to a stack.
    Stacked(StackIdentity),
    /// A branch outside of any stack, e.g. `master`.
    Plain(String),
}

/// A local branch together with the commit it points at.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BranchRecord {
    /// The parsed branch name.
    pub name: BranchName,
    /// The hash of the commit the branch points at.
    pub target: String,
}

/// A member of the current stack.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StackMember {
    /// The identity of the branch.
    pub identity: StackIdentity,
    /// The hash of the commit the branch points at.
    pub target: String,
}

/// The references a remote advertises under a stack's prefix, keyed by full reference name.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct RemoteSnapshot {
    refs: BTreeMap<String, String>,
}

impl RemoteSnapshot {
    /// Returns the hash the remote advertises for `reference`, if any.
    pub fn get(&self, reference: &str) -> Option<&str> {
        self.refs.get(reference).map(String::as_str)
    }

    /// Returns `true` if the remote advertises nothing under the prefix.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Returns the number of advertised references.
    pub fn len(&self) -> usize {
        self.refs.len()
    }
}

impl FromIterator<(String, String)> for RemoteSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            refs: iter.into_iter().collect(),
        }
    }
}

/// Classification of a local stack member against the remote.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RemoteState {
    /// The remote does not have the branch.
    Ahead,
    /// The remote has the branch at the same commit.
    Same,
    /// The remote has the branch at a different commit.
    Diverged,
    /// There is no remote context to classify against.
    None,
}

/// The remote classification of a single stack member.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BranchStatus {
    /// The `<NNN>_<label>` id of the member.
    pub id: String,
    /// The remote classification.
    pub state: RemoteState,
}
