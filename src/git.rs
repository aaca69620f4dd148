//! Utilities for interacting with `git` repositories for the `gitit` application.

use crate::{
    constants::REFS_HEADS,
    errors::{StError, StResult},
    stack::RemoteSnapshot,
};
use git2::{
    build::CheckoutBuilder, BranchType, Cred, CredentialType, Direction, ErrorCode, PushOptions,
    RemoteCallbacks, Repository,
};
use std::{env, path::Path};
use tracing::{debug, info, warn};

/// Returns the repository for the current working directory, and [None] if
/// the current working directory is not within a git repository or an error
/// occurs.
pub fn active_repository() -> Option<Repository> {
    discover_repository(env::current_dir().ok()?)
}

/// Returns the repository containing `path`, and [None] if there is none.
pub fn discover_repository(path: impl AsRef<Path>) -> Option<Repository> {
    Repository::discover(path).ok()
}

/// A configured remote.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RemoteDescriptor {
    /// The name of the remote, e.g. `origin`.
    pub name: String,
    /// The fetch URL followed by the push URL, when they are set.
    pub urls: Vec<String>,
}

/// Extension trait for the [Repository] type to expose the operations the stack engine needs.
pub trait RepositoryExt {
    /// Returns the full reference name `HEAD` points at.
    ///
    /// ## Returns
    /// - `Ok(String)` - The reference, e.g. `refs/heads/kb1234/003_ui`.
    /// - `Err(StError::NoHead)` - `HEAD` is unborn or detached.
    fn head_reference(&self) -> StResult<String>;

    /// Returns every local branch reference with the hash of the commit it points at.
    fn branch_references(&self) -> StResult<Vec<(String, String)>>;

    /// Returns the configured remotes, in configuration order.
    fn remote_descriptors(&self) -> StResult<Vec<RemoteDescriptor>>;

    /// Lists the references `remote` advertises under `prefix`, without fetching any objects.
    ///
    /// ## Takes
    /// - `remote` - The remote to contact.
    /// - `prefix` - The reference prefix to keep, e.g. `refs/heads/kb1234/`.
    ///
    /// ## Returns
    /// - `Ok(RemoteSnapshot)` - The advertised references under `prefix`.
    /// - `Err(StError::RemoteUnavailable)` - The remote could not be contacted.
    fn remote_references(&self, remote: &RemoteDescriptor, prefix: &str) -> StResult<RemoteSnapshot>;

    /// Creates a branch at `HEAD`'s commit and checks it out, or checks out an existing branch.
    ///
    /// ## Takes
    /// - `reference` - The full reference name of the branch.
    /// - `create` - Whether the branch must be created.
    ///
    /// ## Returns
    /// - `Ok(())` - The branch is checked out.
    /// - `Err(StError::BranchCreationFailed)` - The branch already exists or could not be created.
    /// - `Err(StError::UnknownBranch)` - The branch to switch to does not exist.
    fn create_or_switch_branch(&self, reference: &str, create: bool) -> StResult<()>;

    /// Checks out the branch `branch_name` with a safe checkout, keeping local modifications
    /// that do not conflict with the target tree.
    fn checkout_branch(&self, branch_name: &str) -> StResult<()>;

    /// Pushes `refspecs` to `remote`.
    ///
    /// ## Returns
    /// - `Ok(())` - Every reference was updated.
    /// - `Err(StError::RemoteUnavailable)` - The transport failed or the remote rejected an update.
    fn push_refspecs(&self, remote: &RemoteDescriptor, refspecs: &[String]) -> StResult<()>;
}

impl RepositoryExt for Repository {
    fn head_reference(&self) -> StResult<String> {
        let head = match self.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Err(StError::NoHead)
            }
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            return Err(StError::NoHead);
        }

        head.name().map(ToOwned::to_owned).ok_or(StError::NoHead)
    }

    fn branch_references(&self) -> StResult<Vec<(String, String)>> {
        let mut references = Vec::new();
        for branch in self.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            let reference = branch.get();

            let (Some(name), Some(target)) = (reference.name(), reference.target()) else {
                warn!(name = ?reference.name_bytes(), "Skipping unreadable branch reference");
                continue;
            };
            references.push((name.to_string(), target.to_string()));
        }

        debug!(count = references.len(), "Enumerated local branches");
        Ok(references)
    }

    fn remote_descriptors(&self) -> StResult<Vec<RemoteDescriptor>> {
        self.remotes()?
            .iter()
            .flatten()
            .map(|name| {
                let remote = self.find_remote(name)?;
                let urls = remote
                    .url()
                    .into_iter()
                    .chain(remote.pushurl())
                    .map(ToOwned::to_owned)
                    .collect();
                Ok::<_, StError>(RemoteDescriptor {
                    name: name.to_string(),
                    urls,
                })
            })
            .collect()
    }

    fn remote_references(&self, remote: &RemoteDescriptor, prefix: &str) -> StResult<RemoteSnapshot> {
        let unavailable = |e: git2::Error| {
            StError::RemoteUnavailable(format!("{}: {}", remote.name, e.message()))
        };

        info!(remote = %remote.name, prefix, "Listing remote references");
        let mut git_remote = self.find_remote(&remote.name).map_err(unavailable)?;
        let connection = git_remote
            .connect_auth(Direction::Fetch, Some(remote_callbacks()), None)
            .map_err(unavailable)?;

        let snapshot = connection
            .list()
            .map_err(unavailable)?
            .iter()
            .filter(|head| head.name().starts_with(prefix))
            .map(|head| (head.name().to_string(), head.oid().to_string()))
            .collect::<RemoteSnapshot>();

        debug!(remote = %remote.name, count = snapshot.len(), "Listed remote references");
        Ok(snapshot)
    }

    fn create_or_switch_branch(&self, reference: &str, create: bool) -> StResult<()> {
        let branch_name = reference.strip_prefix(REFS_HEADS).unwrap_or(reference);

        if create {
            let head_commit = self.head().and_then(|h| h.peel_to_commit()).map_err(|e| {
                match e.code() {
                    ErrorCode::UnbornBranch | ErrorCode::NotFound => StError::NoHead,
                    _ => e.into(),
                }
            })?;
            self.branch(branch_name, &head_commit, false)
                .map_err(|e| {
                    StError::BranchCreationFailed(branch_name.to_string(), e.message().to_string())
                })?;
            info!(branch = branch_name, "Created branch");
        } else if self.find_branch(branch_name, BranchType::Local).is_err() {
            return Err(StError::UnknownBranch(branch_name.to_string()));
        }

        self.checkout_branch(branch_name)
    }

    fn checkout_branch(&self, branch_name: &str) -> StResult<()> {
        let reference = format!("{}{}", REFS_HEADS, branch_name);
        let target = self.revparse_single(&reference)?;

        // Update the working tree before moving HEAD, so the old HEAD is the checkout baseline.
        self.checkout_tree(&target, Some(CheckoutBuilder::new().safe()))?;
        self.set_head(&reference)?;

        debug!(branch = branch_name, "Checked out branch");
        Ok(())
    }

    fn push_refspecs(&self, remote: &RemoteDescriptor, refspecs: &[String]) -> StResult<()> {
        let unavailable = |e: git2::Error| {
            StError::RemoteUnavailable(format!("{}: {}", remote.name, e.message()))
        };

        info!(remote = %remote.name, ?refspecs, "Pushing");
        let mut git_remote = self.find_remote(&remote.name).map_err(unavailable)?;

        let mut rejected = Vec::new();
        {
            let mut callbacks = remote_callbacks();
            callbacks.push_update_reference(|refname, status| {
                if let Some(message) = status {
                    rejected.push(format!("{} ({})", refname, message));
                }
                Ok(())
            });

            let mut push_options = PushOptions::new();
            push_options.remote_callbacks(callbacks);
            git_remote
                .push(refspecs, Some(&mut push_options))
                .map_err(unavailable)?;
        }

        if !rejected.is_empty() {
            return Err(StError::RemoteUnavailable(format!(
                "{} rejected {}",
                remote.name,
                rejected.join(", ")
            )));
        }

        Ok(())
    }
}

/// Returns [RemoteCallbacks] that authenticate with the ssh agent or git's credential helper.
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|url, username_from_url, allowed_types| {
        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(username) = username_from_url {
                return Cred::ssh_key_from_agent(username);
            }
        }
        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            let config = git2::Config::open_default()?;
            return Cred::credential_helper(&config, url, username_from_url);
        }
        Cred::default()
    });
    callbacks
}
