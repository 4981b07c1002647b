//! catmaid-source CLI - Command-line interface
//!
//! Browses CATMAID servers from the terminal: completes addresses the way
//! the viewer's address bar does and prints the pyramid a stack mirror
//! resolves to.

mod commands;
mod error;
mod runner;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "catmaid-source", version, about = "Browse CATMAID tile stacks")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Server URL used for addresses given without http(s):// (overrides config.ini)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Complete the last segment of a partial address
    Complete {
        /// Address such as https://host/1/ or, with a configured server, 1/
        address: String,

        /// Print the completion result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the zoom levels of a stack mirror
    Volume {
        /// Address ending in <project>/<stack>/<mirror>
        address: String,
    },

    /// List projects and their stacks
    Projects {
        /// Server address with optional path prefix (defaults to the configured server)
        address: Option<String>,
    },

    /// Show the skeleton source of a project
    Skeleton {
        /// Address ending in <project>
        address: String,
    },

    /// View configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Complete { address, json } => {
            commands::complete::run(cli.server.as_deref(), &address, json)
        }
        Commands::Volume { address } => commands::volume::run(cli.server.as_deref(), &address),
        Commands::Projects { address } => {
            commands::projects::run(cli.server.as_deref(), address.as_deref())
        }
        Commands::Skeleton { address } => {
            commands::skeleton::run(cli.server.as_deref(), &address)
        }
        Commands::Config { command } => commands::config::run(command),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
