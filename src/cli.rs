//! The CLI for `gitit`.

use crate::{
    config::StConfig,
    ctx::StContext,
    errors::{StError, StResult},
    git::{active_repository, discover_repository},
    subcommands::Subcommands,
};
use clap::{
    builder::styling::{AnsiColor, Color, Style},
    ArgAction, Parser,
};
use std::path::PathBuf;
use tracing::Level;

const ABOUT: &str = "gitit groups git branches into numbered stacks and works with a stack as a unit.";

/// The CLI application for `gitit`.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(about = ABOUT, version, styles = cli_styles())]
pub struct Cli {
    /// Verbosity level (0-4)
    #[arg(short, action = ArgAction::Count)]
    pub v: u8,
    /// Run as if started in this directory instead of the current working directory
    #[arg(short = 'C', value_name = "PATH")]
    pub directory: Option<PathBuf>,
    /// Path of the configuration file [default: ~/.gitit.toml]
    #[arg(long, env = "GITIT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// The subcommand to run
    #[clap(subcommand)]
    pub subcommand: Option<Subcommands>,
}

impl Cli {
    /// Run the CLI application with the given arguments.
    pub async fn run(self) -> StResult<()> {
        let subcommand = self.subcommand.ok_or(StError::MissingSubcommand)?;

        let repo = match self.directory {
            Some(directory) => discover_repository(directory),
            None => active_repository(),
        }
        .ok_or(StError::NotARepository)?;

        let config_path = self.config.or_else(StConfig::default_path);
        let config = StConfig::load_or_default(config_path.as_deref())?;

        subcommand.run(StContext::new(&repo, config)).await
    }

    /// Initializes the tracing subscriber. Logs are written to stderr, so that stdout only
    /// carries command output.
    ///
    /// # Returns
    /// - `StResult<Self>` - Ok if successful, Err otherwise.
    pub(crate) fn init_tracing_subscriber(self) -> StResult<Self> {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(match self.v {
                0 => Level::ERROR,
                1 => Level::WARN,
                2 => Level::INFO,
                3 => Level::DEBUG,
                _ => Level::TRACE,
            })
            .try_init()
            .map_err(|e| StError::IoError(std::io::Error::other(e)))?;

        Ok(self)
    }
}

const HEADING: Style = Style::new()
    .bold()
    .underline()
    .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const ERROR: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Red)));
const LITERAL: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Help and error styles: yellow headings, green literals, red errors.
const fn cli_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(HEADING)
        .header(HEADING)
        .literal(LITERAL)
        .valid(LITERAL.bold())
        .invalid(ERROR)
        .error(ERROR)
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
}
