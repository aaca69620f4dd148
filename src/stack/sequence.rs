//! Allocation of sequence numbers within a stack.

use super::StackIdentity;
use crate::{
    constants::{FIRST_SEQUENCE, MAX_SEQUENCE},
    errors::{StError, StResult},
};

/// Returns the sequence number for the next branch in `stack`, one past the numerically largest
/// existing sequence.
///
/// ## Takes
/// - `stack` - The name of the stack being grown.
/// - `existing` - The current members of the stack, in any order.
///
/// ## Returns
/// - `Ok(u16)` - The next sequence number.
/// - `Err(StError::EmptyStack)` - `existing` is empty. New stacks start through [init_identity].
/// - `Err(StError::SequenceExhausted)` - The next number would not fit in three digits.
pub(crate) fn next_sequence(stack: &str, existing: &[StackIdentity]) -> StResult<u16> {
    let max = existing
        .iter()
        .map(|identity| identity.sequence)
        .max()
        .ok_or_else(|| StError::EmptyStack(stack.to_string()))?;

    if max >= MAX_SEQUENCE {
        return Err(StError::SequenceExhausted(stack.to_string()));
    }

    Ok(max + 1)
}

/// Returns the identity of the first branch of a brand new stack. Existing branches are never
/// consulted; a name collision is for the repository to report.
pub(crate) fn init_identity(stack: &str, label: &str) -> StackIdentity {
    StackIdentity::new(stack, FIRST_SEQUENCE, label)
}
