//! Stack mutations: starting a stack, growing it, moving within it and pushing it.

use super::StContext;
use crate::{
    errors::{StError, StResult},
    git::RepositoryExt,
    stack::{init_identity, next_branch, resolve_short_id, StackIdentity, StackMember},
};
use git2::Reference;
use tracing::info;

impl StContext<'_> {
    /// Starts a new stack from a `<stack>/<label>` name, creating and checking out
    /// `<stack>/001_<label>` at `HEAD`'s commit.
    ///
    /// ## Takes
    /// - `name` - The `<stack>/<label>` name.
    ///
    /// ## Returns
    /// - `Ok(StackIdentity)` - The identity of the created branch.
    /// - `Err(StError::InvalidArgument)` - `name` is not `<stack>/<label>`.
    /// - `Err(StError::BranchCreationFailed)` - The branch already exists.
    pub fn init_stack(&self, name: &str) -> StResult<StackIdentity> {
        let (stack, label) = name
            .split_once('/')
            .filter(|(stack, label)| !stack.is_empty() && !label.is_empty())
            .ok_or_else(|| StError::InvalidArgument(name.to_string(), "expected <stack>/<label>"))?;
        validate_label(label)?;

        let identity = init_identity(stack, label);
        validate_reference(&identity)?;

        self.repository
            .create_or_switch_branch(&identity.reference(), true)?;
        info!(branch = %identity, "Initialised stack");
        Ok(identity)
    }

    /// Creates and checks out the next branch of the current stack, labelled `label`.
    ///
    /// ## Returns
    /// - `Ok(StackIdentity)` - The identity of the created branch.
    /// - `Err(StError::InvalidStackReference)` - `HEAD` is not a stack branch.
    /// - `Err(StError::InvalidSequence)` - A member of the stack has a malformed sequence.
    /// - `Err(StError::BranchCreationFailed)` - The branch already exists.
    pub fn grow_stack(&self, label: &str) -> StResult<StackIdentity> {
        validate_label(label)?;

        let (head, members) = self.require_stack(true)?;
        let identity = next_branch(&head.stack, &members, label)?;
        validate_reference(&identity)?;

        self.repository
            .create_or_switch_branch(&identity.reference(), true)?;
        info!(branch = %identity, parent = %head, "Grew stack");
        Ok(identity)
    }

    /// Checks out the member of the current stack addressed by `short_id`.
    ///
    /// ## Returns
    /// - `Ok(StackIdentity)` - The identity of the checked out branch.
    /// - `Err(StError::UnknownBranch)` - No member matches.
    /// - `Err(StError::AmbiguousBranch)` - Several members match.
    pub fn checkout_short_id(&self, short_id: &str) -> StResult<StackIdentity> {
        let (_, members) = self.require_stack(false)?;
        let member = resolve_short_id(short_id, &members).into_result(short_id)?;
        self.checkout_member(member)
    }

    /// Checks out a member of the current stack.
    pub fn checkout_member(&self, member: &StackMember) -> StResult<StackIdentity> {
        self.repository
            .create_or_switch_branch(&member.identity.reference(), false)?;
        info!(branch = %member.identity, "Checked out stack member");
        Ok(member.identity.clone())
    }

    /// Pushes every member of the current stack to the selected remote. Other stacks are never
    /// pushed.
    ///
    /// ## Takes
    /// - `force` - Whether to force the updates.
    ///
    /// ## Returns
    /// - `Ok((String, Vec<StackIdentity>))` - The remote pushed to, and the pushed branches.
    /// - `Err(StError::RemoteUnavailable)` - There is no remote, or the push failed.
    pub fn push_stack(&self, force: bool) -> StResult<(String, Vec<StackIdentity>)> {
        let (_, members) = self.require_stack(false)?;
        let remote = self
            .select_remote()?
            .ok_or_else(|| StError::RemoteUnavailable("no remote configured".to_string()))?;

        let refspecs = members
            .iter()
            .map(|m| {
                let reference = m.identity.reference();
                format!("{}{}:{}", if force { "+" } else { "" }, reference, reference)
            })
            .collect::<Vec<_>>();
        self.repository.push_refspecs(&remote, &refspecs)?;

        let pushed = members.into_iter().map(|m| m.identity).collect();
        Ok((remote.name, pushed))
    }
}

/// Rejects labels that would change the segment count of the branch name.
fn validate_label(label: &str) -> StResult<()> {
    if label.is_empty() {
        return Err(StError::MissingArgument("label"));
    }
    if label.contains('/') {
        return Err(StError::InvalidArgument(
            label.to_string(),
            "labels cannot contain `/`",
        ));
    }
    Ok(())
}

/// Rejects identities git would refuse as a reference name.
fn validate_reference(identity: &StackIdentity) -> StResult<()> {
    if Reference::is_valid_name(&identity.reference()) {
        Ok(())
    } else {
        Err(StError::InvalidArgument(
            identity.branch_name(),
            "not a valid git branch name",
        ))
    }
}
