//! The in-memory context of the `gitit` application.
//!
//! [StContext] is the only place where repository data and the pure stack engine meet: it reads
//! `HEAD`, the branch list and the remote's references through [RepositoryExt], parses them,
//! and hands plain values to [crate::stack].

use crate::{
    config::StConfig,
    constants::DEFAULT_REMOTE,
    errors::{StError, StResult},
    git::{RemoteDescriptor, RepositoryExt},
    stack::{self, stack_prefix, BranchName, BranchRecord, StackIdentity, StackMember},
};
use git2::Repository;
use tracing::{debug, warn};

mod fmt;
mod stack_management;

/// The in-memory context of the `gitit` application. Built fresh for every command.
pub struct StContext<'a> {
    /// The repository the command operates on.
    pub repository: &'a Repository,
    /// The user configuration.
    pub config: StConfig,
}

impl<'a> StContext<'a> {
    /// Creates a new [StContext] for the given [Repository] and configuration.
    pub fn new(repository: &'a Repository, config: StConfig) -> Self {
        Self { repository, config }
    }

    /// Returns the parsed name of the checked out branch.
    ///
    /// Branches whose names do not follow the stack convention, e.g. `feature/login`, are not
    /// part of any stack and come back as [BranchName::Plain].
    pub fn head(&self) -> StResult<BranchName> {
        let reference = self.repository.head_reference()?;
        match BranchName::parse(&reference) {
            Ok(name) => Ok(name),
            Err(StError::InvalidStackReference(_) | StError::InvalidSequence(_)) => {
                debug!(reference = %reference, "HEAD is not a stack branch");
                Ok(BranchName::Plain(BranchName::short_reference(&reference).to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the parsed local branches.
    ///
    /// References that are not stack or plain branches are skipped. A malformed member of
    /// `strict_stack`, i.e. a branch under `refs/heads/<stack>/` with a non-numeric sequence, is
    /// an error rather than being skipped.
    ///
    /// ## Takes
    /// - `strict_stack` - The stack whose members must all be well formed, if any.
    ///
    /// ## Returns
    /// - `Ok(Vec<BranchRecord>)` - The parsed branches.
    /// - `Err(StError::InvalidSequence)` - A member of `strict_stack` is malformed.
    pub fn branch_records(&self, strict_stack: Option<&str>) -> StResult<Vec<BranchRecord>> {
        let strict_prefix = strict_stack.map(stack_prefix);

        let mut records = Vec::new();
        for (reference, target) in self.repository.branch_references()? {
            match BranchName::parse(&reference) {
                Ok(name) => records.push(BranchRecord { name, target }),
                Err(StError::InvalidSequence(r))
                    if strict_prefix.as_deref().is_some_and(|p| reference.starts_with(p)) =>
                {
                    return Err(StError::InvalidSequence(r));
                }
                Err(e) => debug!(reference = %reference, error = %e, "Skipping branch outside of any stack"),
            }
        }

        Ok(records)
    }

    /// Returns the members of the stack `head` belongs to, in ascending sequence order, or
    /// [None] if `head` is a plain branch.
    pub fn current_stack(&self, head: &BranchName, strict: bool) -> StResult<Option<Vec<StackMember>>> {
        let strict_stack = head.as_stacked().filter(|_| strict).map(|h| h.stack.as_str());
        let records = self.branch_records(strict_stack)?;
        Ok(stack::current_stack(head, &records))
    }

    /// Returns the checked out stack branch together with the members of its stack.
    ///
    /// ## Returns
    /// - `Ok((StackIdentity, Vec<StackMember>))` - `HEAD` and its stack.
    /// - `Err(StError::InvalidStackReference)` - `HEAD` is not a stack branch.
    pub fn require_stack(&self, strict: bool) -> StResult<(StackIdentity, Vec<StackMember>)> {
        let head = self.head()?;
        let members = self
            .current_stack(&head, strict)?
            .ok_or_else(|| StError::InvalidStackReference(head.short_name()))?;

        match head {
            BranchName::Stacked(identity) => Ok((identity, members)),
            BranchName::Plain(name) => Err(StError::InvalidStackReference(name)),
        }
    }

    /// Selects the remote to compare against and push to.
    ///
    /// The configured remote wins, then `origin`, then the first configured remote.
    ///
    /// ## Returns
    /// - `Ok(Some(RemoteDescriptor))` - The selected remote.
    /// - `Ok(None)` - The repository has no remotes.
    /// - `Err(StError::RemoteUnavailable)` - The configured remote does not exist.
    pub fn select_remote(&self) -> StResult<Option<RemoteDescriptor>> {
        let mut remotes = self.repository.remote_descriptors()?;

        if let Some(configured) = self.config.remote.as_deref() {
            return remotes
                .into_iter()
                .find(|r| r.name == configured)
                .map(Some)
                .ok_or_else(|| {
                    StError::RemoteUnavailable(format!("remote `{}` is not configured", configured))
                });
        }

        if remotes.is_empty() {
            warn!("Repository has no remotes");
            return Ok(None);
        }

        let index = remotes
            .iter()
            .position(|r| r.name == DEFAULT_REMOTE)
            .unwrap_or_default();
        let remote = remotes.swap_remove(index);
        debug!(remote = %remote.name, urls = ?remote.urls, "Selected remote");
        Ok(Some(remote))
    }
}

#[cfg(test)]
pub(crate) mod test_utils;
