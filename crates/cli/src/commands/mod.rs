//! CLI command definitions and execution
//!
//! clap owns the global flags and the `help` command. Every other command
//! name is captured as an external subcommand and routed to the dispatcher,
//! which validates it against the registered descriptors.

use clap::{Parser, Subcommand};
use ossctl_core::{CommandRegistry, Result};

use crate::exit_code::ExitCode;
use crate::logging;
use crate::output::{Formatter, OutputConfig};

mod bucket_config;
mod bucket_policy;
mod cors;
mod help;
mod lifecycle;
mod response_header;
mod run;
mod website;

pub use help::HelpArgs;

/// ossctl - Object storage bucket configuration CLI
///
/// Sets, gets and deletes bucket configuration documents such as response
/// header rules, CORS, lifecycle, static website and access policy.
#[derive(Parser, Debug)]
#[command(name = "ossctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show all commands or the detailed help of one command
    Help(HelpArgs),

    /// Storage command, see `ossctl help`
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Build the registry of every storage command
pub fn registry() -> Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();
    registry.register(Box::new(response_header::command()))?;
    registry.register(Box::new(cors::command()))?;
    registry.register(Box::new(lifecycle::command()))?;
    registry.register(Box::new(website::command()))?;
    registry.register(Box::new(bucket_policy::command()))?;
    Ok(registry)
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    });

    let registry = match registry() {
        Ok(registry) => registry,
        Err(e) => {
            formatter.error(&format!("Failed to build the command registry: {e}"));
            return ExitCode::GeneralError;
        }
    };

    match cli.command {
        Some(Commands::External(tokens)) => {
            run::execute(tokens, registry, &formatter, cli.debug).await
        }
        Some(Commands::Help(args)) => {
            logging::init(cli.debug, None);
            help::execute(args, &registry, &formatter)
        }
        None => {
            logging::init(cli.debug, None);
            help::execute(HelpArgs::default(), &registry, &formatter)
        }
    }
}
