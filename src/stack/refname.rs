//! Parsing and formatting of the `<stack>/<NNN>_<label>` branch naming convention.

use super::{BranchName, StackIdentity};
use crate::{
    constants::REFS_HEADS,
    errors::{StError, StResult},
};
use std::fmt::{self, Display};

impl BranchName {
    /// Parses a reference into a [BranchName].
    ///
    /// The `refs/heads/` prefix is optional. After stripping it, one segment is a plain branch
    /// and two segments are a stack branch; anything else is rejected.
    ///
    /// ## Takes
    /// - `raw` - The reference, e.g. `refs/heads/kb1234/003_ui` or `kb1234/003_ui`.
    ///
    /// ## Returns
    /// - `Ok(BranchName)` - The parsed branch name.
    /// - `Err(StError::InvalidStackReference)` - The segment count is unsupported, or a segment
    ///   is empty.
    /// - `Err(StError::InvalidSequence)` - The reference has the shape of a stack branch, but its
    ///   sequence is not a three digit number.
    pub fn parse(raw: &str) -> StResult<Self> {
        let short = Self::short_reference(raw);
        let segments = short.split('/').collect::<Vec<_>>();

        if segments.iter().any(|s| s.is_empty()) {
            return Err(StError::InvalidStackReference(raw.to_string()));
        }

        match segments.as_slice() {
            [label] => Ok(Self::Plain(label.to_string())),
            [stack, id] => parse_id(stack, id, raw).map(Self::Stacked),
            _ => Err(StError::InvalidStackReference(raw.to_string())),
        }
    }

    /// Strips the `refs/heads/` prefix from `reference`, if present.
    pub fn short_reference(reference: &str) -> &str {
        reference.strip_prefix(REFS_HEADS).unwrap_or(reference)
    }

    /// Returns the short branch name, without the `refs/heads/` prefix.
    pub fn short_name(&self) -> String {
        match self {
            Self::Stacked(identity) => identity.branch_name(),
            Self::Plain(label) => label.clone(),
        }
    }

    /// Returns the [StackIdentity] if the branch belongs to a stack.
    pub fn as_stacked(&self) -> Option<&StackIdentity> {
        match self {
            Self::Stacked(identity) => Some(identity),
            Self::Plain(_) => None,
        }
    }
}

/// Splits `NNN_label` on the first `_` and parses the sequence number.
fn parse_id(stack: &str, id: &str, raw: &str) -> StResult<StackIdentity> {
    let (sequence, label) = id
        .split_once('_')
        .ok_or_else(|| StError::InvalidSequence(raw.to_string()))?;

    if sequence.len() != 3 || !sequence.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StError::InvalidSequence(raw.to_string()));
    }
    if label.is_empty() {
        return Err(StError::InvalidStackReference(raw.to_string()));
    }

    let sequence = sequence
        .parse::<u16>()
        .map_err(|_| StError::InvalidSequence(raw.to_string()))?;

    Ok(StackIdentity::new(stack, sequence, label))
}

impl StackIdentity {
    /// Creates a new [StackIdentity].
    pub fn new(stack: impl Into<String>, sequence: u16, label: impl Into<String>) -> Self {
        Self {
            stack: stack.into(),
            sequence,
            label: label.into(),
        }
    }

    /// Returns the `<NNN>_<label>` segment, which short ids are matched against.
    pub fn id(&self) -> String {
        format!("{:03}_{}", self.sequence, self.label)
    }

    /// Returns the short branch name, `<stack>/<NNN>_<label>`.
    pub fn branch_name(&self) -> String {
        format!("{}/{}", self.stack, self.id())
    }

    /// Returns the full reference name, `refs/heads/<stack>/<NNN>_<label>`.
    pub fn reference(&self) -> String {
        format!("{}{}", REFS_HEADS, self.branch_name())
    }
}

impl Display for StackIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:03}_{}", self.stack, self.sequence, self.label)
    }
}

/// Returns the reference prefix shared by every member of `stack`, `refs/heads/<stack>/`.
pub(crate) fn stack_prefix(stack: &str) -> String {
    format!("{}{}/", REFS_HEADS, stack)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_stack_reference() {
        let name = BranchName::parse("refs/heads/kb1234/003_ui").unwrap();
        assert_eq!(name, BranchName::Stacked(StackIdentity::new("kb1234", 3, "ui")));
    }

    #[test]
    fn parse_short_stack_name() {
        let name = BranchName::parse("kb1234/001_docs").unwrap();
        assert_eq!(name, BranchName::Stacked(StackIdentity::new("kb1234", 1, "docs")));
    }

    #[test]
    fn parse_plain_reference() {
        let name = BranchName::parse("refs/heads/master").unwrap();
        assert_eq!(name, BranchName::Plain("master".to_string()));
        assert!(name.as_stacked().is_none());
    }

    #[test]
    fn label_splits_on_first_underscore() {
        let name = BranchName::parse("refs/heads/kb1234/004_ml_fairy").unwrap();
        let identity = name.as_stacked().unwrap();
        assert_eq!(identity.sequence, 4);
        assert_eq!(identity.label, "ml_fairy");
    }

    #[test]
    fn format_parse_is_identity() {
        for raw in [
            "kb1234/001_docs",
            "kb1234/010_api",
            "123/999_migration",
            "a/000_b",
            "x/042_with_underscores",
        ] {
            let name = BranchName::parse(raw).unwrap();
            assert_eq!(name.as_stacked().unwrap().to_string(), raw);
            assert_eq!(name.short_name(), raw);
        }
    }

    #[test]
    fn wrong_segment_counts_are_rejected() {
        for raw in [
            "",
            "refs/heads/",
            "refs/heads/a/b/c",
            "refs/heads/a/b/c/d",
            "refs/remotes/origin/kb1234/001_docs",
            "kb1234//001_docs",
        ] {
            assert!(
                matches!(BranchName::parse(raw), Err(StError::InvalidStackReference(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn non_numeric_sequence_is_distinct_error() {
        for raw in [
            "refs/heads/kb1234/abc_ui",
            "refs/heads/kb1234/ui",
            "refs/heads/kb1234/01_ui",
            "refs/heads/kb1234/0001_ui",
            "refs/heads/kb1234/+01_ui",
        ] {
            assert!(
                matches!(BranchName::parse(raw), Err(StError::InvalidSequence(_))),
                "{raw} should be an invalid sequence"
            );
        }
    }

    #[test]
    fn empty_label_is_rejected() {
        assert!(matches!(
            BranchName::parse("kb1234/001_"),
            Err(StError::InvalidStackReference(_))
        ));
    }

    #[test]
    fn identity_names() {
        let identity = StackIdentity::new("kb1234", 7, "ui");
        assert_eq!(identity.id(), "007_ui");
        assert_eq!(identity.branch_name(), "kb1234/007_ui");
        assert_eq!(identity.reference(), "refs/heads/kb1234/007_ui");
        assert_eq!(stack_prefix("kb1234"), "refs/heads/kb1234/");
    }
}
