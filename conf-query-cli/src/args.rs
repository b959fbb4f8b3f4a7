use crate::config::DialectName;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "confq", version)]
#[command(about = "Validate conference query filters and render them as SQL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./confq.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a query request and print the normalized filters as JSON
    Check {
        /// Request JSON file, or - for stdin
        input: PathBuf,
    },

    /// Render a query request as parameterized SQL
    Sql {
        /// Request JSON file, or - for stdin
        input: PathBuf,

        /// SQL dialect (overrides the config file)
        #[arg(short, long, value_enum)]
        dialect: Option<DialectName>,

        /// Table name (overrides the config file)
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Run a query request against a JSON file of conferences
    Run {
        /// Request JSON file, or - for stdin
        input: PathBuf,

        /// JSON array of conferences
        #[arg(long)]
        data: PathBuf,
    },

    /// Print the nearly-sold-out announcement for a JSON file of conferences
    Announce {
        /// JSON array of conferences
        #[arg(long)]
        data: PathBuf,
    },
}
