#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use clap::Parser;
use nu_ansi_term::Color;
use std::process::ExitCode;

mod cli;
mod config;
mod constants;
mod ctx;
mod errors;
mod git;
mod stack;
mod subcommands;

#[tokio::main]
async fn main() -> ExitCode {
    let result = match cli::Cli::parse().init_tracing_subscriber() {
        Ok(cli) => cli.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", Color::Red.bold().paint("error:"), e);
            ExitCode::from(e.exit_code())
        }
    }
}
