//! Contains the status report logic for the [StContext] struct.

use super::StContext;
use crate::{
    errors::StResult,
    git::RepositoryExt,
    stack::{classify, stack_prefix, RemoteSnapshot, StatusReport},
};
use tracing::debug;

impl StContext<'_> {
    /// Builds the status report for the checked out branch.
    ///
    /// The remote is listed once per call and never cached; with `query_remote` unset the report
    /// carries no remote line and no markers.
    ///
    /// ## Takes
    /// - `query_remote` - Whether the remote's references should be listed.
    ///
    /// ## Returns
    /// - `Ok(String)` - The rendered report.
    /// - `Err(StError::RemoteUnavailable)` - The remote could not be listed.
    pub fn status_report(&self, query_remote: bool) -> StResult<String> {
        let head = self.head()?;
        let Some(members) = self.current_stack(&head, false)? else {
            return Ok(StatusReport {
                head: &head,
                remote: None,
                status: &[],
            }
            .to_string());
        };

        let remote = if query_remote && self.config.query_remote {
            self.select_remote()?
        } else {
            debug!("Skipping remote status");
            None
        };

        let snapshot = match (&remote, head.as_stacked()) {
            (Some(remote), Some(identity)) => self
                .repository
                .remote_references(remote, &stack_prefix(&identity.stack))?,
            _ => RemoteSnapshot::default(),
        };
        let status = classify(&members, &snapshot);

        Ok(StatusReport {
            head: &head,
            remote: remote.as_ref().map(|r| r.name.as_str()),
            status: &status,
        }
        .to_string())
    }
}
