//! `confq` - validate conference query filters from the command line.

use clap::Parser;
use conf_query::{ConferenceError, FilterError, ParseError};
use std::process::ExitCode;

mod args;
mod commands;
mod config;
mod logger;

use args::{Cli, Commands};
use config::Config;

/// Exit code for requests rejected as bad input.
const EXIT_BAD_REQUEST: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("Error: {err:#}");
            if is_bad_request(&err) {
                ExitCode::from(EXIT_BAD_REQUEST)
            } else {
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = Config::resolve(cli.config.as_deref())?;
    let env_level = std::env::var(logger::LOG_ENV).ok();
    logger::init(logger::resolve_level(
        cli.verbose,
        env_level.as_deref(),
        config.log_level.as_deref(),
    ));

    match cli.command {
        Commands::Check { input } => commands::check(&input),
        Commands::Sql {
            input,
            dialect,
            table,
        } => commands::sql(&input, &config, dialect, table.as_deref()),
        Commands::Run { input, data } => commands::run(&input, &data),
        Commands::Announce { data } => commands::announce(&data),
    }
}

fn is_bad_request(err: &anyhow::Error) -> bool {
    err.chain().any(|e| {
        e.downcast_ref::<FilterError>()
            .is_some_and(FilterError::is_bad_request)
            || e.is::<ParseError>()
            || e.is::<ConferenceError>()
    })
}
