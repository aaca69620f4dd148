//! Resolution of the current stack and of short ids within it.

use super::{next_sequence, BranchName, BranchRecord, StackIdentity, StackMember};
use crate::errors::{StError, StResult};
use itertools::Itertools;

/// Returns the members of the stack `head` belongs to, in ascending sequence order.
///
/// ## Takes
/// - `head` - The parsed name of the checked out branch.
/// - `branches` - Every local branch of the repository.
///
/// ## Returns
/// - `Some(Vec<StackMember>)` - The members of `head`'s stack, including `head` itself.
/// - `None` - `head` is a plain branch and belongs to no stack.
pub(crate) fn current_stack(head: &BranchName, branches: &[BranchRecord]) -> Option<Vec<StackMember>> {
    let head = head.as_stacked()?;

    let members = branches
        .iter()
        .filter_map(|record| match &record.name {
            BranchName::Stacked(identity) if identity.stack == head.stack => Some(StackMember {
                identity: identity.clone(),
                target: record.target.clone(),
            }),
            _ => None,
        })
        .sorted_by(|a, b| {
            (a.identity.sequence, &a.identity.label).cmp(&(b.identity.sequence, &b.identity.label))
        })
        .collect();

    Some(members)
}

/// The outcome of looking up a short id within a stack.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum ShortIdMatch<'a> {
    /// Exactly one member matches.
    Found(&'a StackMember),
    /// No member matches.
    NotFound,
    /// Two or more members match, in ascending sequence order.
    Ambiguous(Vec<&'a StackMember>),
}

impl<'a> ShortIdMatch<'a> {
    /// Converts the match into a [StResult], reporting misses and ambiguity as errors.
    pub(crate) fn into_result(self, short_id: &str) -> StResult<&'a StackMember> {
        match self {
            Self::Found(member) => Ok(member),
            Self::NotFound => Err(StError::UnknownBranch(short_id.to_string())),
            Self::Ambiguous(members) => Err(StError::AmbiguousBranch(
                short_id.to_string(),
                members.iter().map(|m| m.identity.id()).collect(),
            )),
        }
    }
}

/// Looks up the member whose `<NNN>_<label>` segment starts with `short_id`.
pub(crate) fn resolve_short_id<'a>(short_id: &str, members: &'a [StackMember]) -> ShortIdMatch<'a> {
    let mut matches = members
        .iter()
        .filter(|member| member.identity.id().starts_with(short_id))
        .sorted_by_key(|member| member.identity.sequence)
        .collect::<Vec<_>>();

    match matches.len() {
        0 => ShortIdMatch::NotFound,
        1 => ShortIdMatch::Found(matches.remove(0)),
        _ => ShortIdMatch::Ambiguous(matches),
    }
}

/// Returns the identity of a new branch labelled `label` on top of `stack`.
///
/// ## Takes
/// - `stack` - The name of the stack to grow.
/// - `members` - The current members of the stack.
/// - `label` - The label of the new branch.
///
/// ## Returns
/// - `Ok(StackIdentity)` - The identity to create. Whether a branch by that name already exists
///   is for the repository to decide.
/// - `Err(_)` - The next sequence number could not be allocated.
pub(crate) fn next_branch(stack: &str, members: &[StackMember], label: &str) -> StResult<StackIdentity> {
    let existing = members.iter().map(|m| m.identity.clone()).collect::<Vec<_>>();
    let sequence = next_sequence(stack, &existing)?;
    Ok(StackIdentity::new(stack, sequence, label))
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(raw: &str, target: &str) -> BranchRecord {
        BranchRecord {
            name: BranchName::parse(raw).unwrap(),
            target: target.to_string(),
        }
    }

    fn branches() -> Vec<BranchRecord> {
        vec![
            record("refs/heads/master", "a0"),
            record("refs/heads/kb1234/003_ui", "a3"),
            record("refs/heads/kb3456/001_migration", "b1"),
            record("refs/heads/kb1234/001_docs", "a1"),
            record("refs/heads/kb1234/002_api", "a2"),
        ]
    }

    fn head() -> BranchName {
        BranchName::parse("refs/heads/kb1234/003_ui").unwrap()
    }

    #[test]
    fn current_stack_filters_and_orders() {
        let members = current_stack(&head(), &branches()).unwrap();
        let ids = members.iter().map(|m| m.identity.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["001_docs", "002_api", "003_ui"]);
        assert_eq!(members[0].target, "a1");
    }

    #[test]
    fn current_stack_orders_numerically() {
        let branches = vec![
            record("kb1234/100_late", "c"),
            record("kb1234/020_middle", "b"),
            record("kb1234/003_early", "a"),
        ];
        let members = current_stack(&BranchName::parse("kb1234/003_early").unwrap(), &branches).unwrap();
        let sequences = members.iter().map(|m| m.identity.sequence).collect::<Vec<_>>();
        assert_eq!(sequences, vec![3, 20, 100]);
    }

    #[test]
    fn plain_head_has_no_stack() {
        let head = BranchName::Plain("master".to_string());
        assert!(current_stack(&head, &branches()).is_none());
    }

    #[test]
    fn short_id_prefix_match() {
        let members = current_stack(&head(), &branches()).unwrap();
        let ShortIdMatch::Found(member) = resolve_short_id("001", &members) else {
            panic!("expected a single match");
        };
        assert_eq!(member.identity.branch_name(), "kb1234/001_docs");

        let ShortIdMatch::Found(member) = resolve_short_id("002_api", &members) else {
            panic!("expected a single match");
        };
        assert_eq!(member.identity.label, "api");
    }

    #[test]
    fn short_id_not_found() {
        let members = current_stack(&head(), &branches()).unwrap();
        assert_eq!(resolve_short_id("004", &members), ShortIdMatch::NotFound);
        // Members of other stacks are never candidates.
        assert_eq!(resolve_short_id("001_migration", &members), ShortIdMatch::NotFound);
        assert!(matches!(
            resolve_short_id("9", &members).into_result("9"),
            Err(StError::UnknownBranch(id)) if id == "9"
        ));
    }

    #[test]
    fn short_id_ambiguous() {
        let members = current_stack(&head(), &branches()).unwrap();
        let ShortIdMatch::Ambiguous(matches) = resolve_short_id("00", &members) else {
            panic!("expected an ambiguous match");
        };
        assert_eq!(matches.len(), 3);

        assert!(matches!(
            resolve_short_id("00", &members).into_result("00"),
            Err(StError::AmbiguousBranch(_, ids)) if ids == vec!["001_docs", "002_api", "003_ui"]
        ));
    }

    #[test]
    fn short_id_ambiguous_on_duplicate_sequence() {
        let branches = vec![record("kb1234/001_docs", "a"), record("kb1234/001_api", "b")];
        let members = current_stack(&BranchName::parse("kb1234/001_docs").unwrap(), &branches).unwrap();
        assert!(matches!(resolve_short_id("001", &members), ShortIdMatch::Ambiguous(m) if m.len() == 2));
        assert!(matches!(resolve_short_id("001_a", &members), ShortIdMatch::Found(_)));
    }

    #[test]
    fn next_branch_formats_new_reference() {
        let members = current_stack(&head(), &branches()).unwrap();
        let identity = next_branch("kb1234", &members, "ml_fairy").unwrap();
        assert_eq!(identity.reference(), "refs/heads/kb1234/004_ml_fairy");
    }
}
