//! Error types for the `gitit` application.

use nu_ansi_term::Color;
use thiserror::Error;

/// Every failure the `gitit` application can surface to the user.
#[derive(Error, Debug)]
pub enum StError {
    /// The working directory is not inside a git repository.
    #[error("Not in a git repository.")]
    NotARepository,
    /// `HEAD` is unborn or detached.
    #[error("HEAD does not point at a branch.")]
    NoHead,
    /// No subcommand was given.
    #[error("Missing subcommand. Run with `--help` to see the available subcommands.")]
    MissingSubcommand,
    /// A required argument was not given.
    #[error("Missing argument: {}", .0)]
    MissingArgument(&'static str),
    /// A user-supplied argument is malformed.
    #[error("Invalid argument `{}`: {}", Color::Blue.paint(.0), .1)]
    InvalidArgument(String, &'static str),
    /// A reference does not have the segment count of a stack branch.
    #[error("`{}` is not a stack branch.", Color::Blue.paint(.0))]
    InvalidStackReference(String),
    /// The sequence portion of a stack branch is not a three digit number.
    #[error("Invalid sequence in stack branch `{}`.", Color::Blue.paint(.0))]
    InvalidSequence(String),
    /// A stack with no members cannot be grown.
    #[error("Stack `{}` has no branches.", Color::Blue.paint(.0))]
    EmptyStack(String),
    /// The stack already uses the largest renderable sequence number.
    #[error("Stack `{}` has no sequence numbers left.", Color::Blue.paint(.0))]
    SequenceExhausted(String),
    /// A short id matched nothing in the current stack.
    #[error("No branch matching `{}` in the current stack.", Color::Blue.paint(.0))]
    UnknownBranch(String),
    /// A short id matched more than one branch in the current stack.
    #[error("`{}` is ambiguous, it matches: {}", Color::Blue.paint(.0), .1.join(", "))]
    AmbiguousBranch(String, Vec<String>),
    /// The repository refused to create a branch.
    #[error("Failed to create branch `{}`: {}", Color::Blue.paint(.0), .1)]
    BranchCreationFailed(String, String),
    /// The remote could not be listed or pushed to.
    #[error("Remote unavailable: {}", .0)]
    RemoteUnavailable(String),
    /// The report could not be written.
    #[error("Failed to write output: {}", .0)]
    OutputFailure(#[source] std::io::Error),
    /// The configuration file could not be loaded.
    #[error("Invalid configuration at `{}`: {}", .0, .1)]
    Config(String, String),
    /// A [git2::Error] occurred.
    #[error("libgit2 error: {}", .0)]
    Git2Error(#[from] git2::Error),
    /// An [inquire::InquireError] occurred.
    #[error("inquire error: {}", .0)]
    InquireError(#[from] inquire::InquireError),
    /// A [std::io::Error] occurred.
    #[error("io error: {}", .0)]
    IoError(#[from] std::io::Error),
}

/// A [Result] with [StError] as the error type.
pub type StResult<T> = Result<T, StError>;

impl StError {
    /// Returns the process exit code for the error. Every kind maps to its own code; `2` is
    /// left to `clap` for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Git2Error(_) => 1,
            Self::MissingSubcommand => 3,
            Self::MissingArgument(_) => 4,
            Self::InvalidArgument(..) => 5,
            Self::NotARepository => 6,
            Self::NoHead => 7,
            Self::InvalidStackReference(_) => 8,
            Self::InvalidSequence(_) => 9,
            Self::EmptyStack(_) => 10,
            Self::SequenceExhausted(_) => 11,
            Self::UnknownBranch(_) => 12,
            Self::AmbiguousBranch(..) => 13,
            Self::BranchCreationFailed(..) => 14,
            Self::RemoteUnavailable(_) => 15,
            Self::OutputFailure(_) => 16,
            Self::Config(..) => 17,
            Self::InquireError(_) => 18,
            Self::IoError(_) => 19,
        }
    }
}
