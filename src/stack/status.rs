//! Classification of local stack members against a remote.
//!
//! Classification compares hashes only. A remote branch that is an ancestor of the local one
//! is reported as diverged just like one that shares no history with it; no merge base is
//! computed and no ahead/behind counts are produced.

use super::{BranchStatus, RemoteSnapshot, RemoteState, StackMember};
use itertools::Itertools;

/// Classifies every member of the stack against the remote's advertised references.
///
/// ## Takes
/// - `members` - The local members of the stack, in any order.
/// - `remote` - What the remote advertises under the stack's prefix.
///
/// ## Returns
/// - One [BranchStatus] per member, in ascending sequence order. Every state is
///   [RemoteState::None] when the remote advertises nothing under the prefix.
pub(crate) fn classify(members: &[StackMember], remote: &RemoteSnapshot) -> Vec<BranchStatus> {
    members
        .iter()
        .sorted_by_key(|member| member.identity.sequence)
        .map(|member| {
            let state = if remote.is_empty() {
                RemoteState::None
            } else {
                match remote.get(&member.identity.reference()) {
                    None => RemoteState::Ahead,
                    Some(hash) if hash == member.target => RemoteState::Same,
                    Some(_) => RemoteState::Diverged,
                }
            };

            BranchStatus {
                id: member.identity.id(),
                state,
            }
        })
        .collect()
}
