//! Storage command execution
//!
//! Every token after the command name is parsed against the option catalog
//! and handed to the dispatcher, so each command keeps its own option surface.
//! The configuration file is only read once a command connects, after the
//! dispatcher has validated the invocation.

use std::io;
use std::time::Instant;

use ossctl_core::{
    CommandRegistry, ConfigManager, Dispatcher, Error, OptionKey, OptionMap, ParsedInvocation,
    RunContext,
};
use ossctl_s3::HttpConnector;

use super::help::{self, HelpArgs};
use crate::console::ConsoleConfirm;
use crate::exit_code::ExitCode;
use crate::logging;
use crate::output::Formatter;

/// Execute one storage command given as raw tokens
pub async fn execute(
    tokens: Vec<String>,
    registry: CommandRegistry,
    formatter: &Formatter,
    debug: bool,
) -> ExitCode {
    let Some((name, rest)) = tokens.split_first() else {
        formatter.error("No command given. Use `ossctl help` to list commands.");
        return ExitCode::UsageError;
    };

    if ParsedInvocation::wants_help(rest) {
        logging::init(debug, None);
        let args = HelpArgs {
            command: Some(name.clone()),
            language: help_language(rest),
        };
        return help::execute(args, &registry, formatter);
    }

    if let Err(e) = registry.resolve(name) {
        return fail(formatter, &e);
    }

    let invocation = match ParsedInvocation::parse(rest) {
        Ok(invocation) => invocation,
        Err(e) => return fail(formatter, &e),
    };

    logging::init(debug, log_level(&invocation.options).as_deref());

    let connector = HttpConnector::new(invocation.options.clone());
    let confirm = ConsoleConfirm;
    let mut stdout = io::stdout();
    let mut ctx = RunContext {
        connector: &connector,
        confirm: &confirm,
        stdout: &mut stdout,
    };

    let mut dispatcher = Dispatcher::new(registry);
    let started = Instant::now();
    match dispatcher.dispatch(name, &invocation, &mut ctx).await {
        Ok(()) => {
            formatter.note(&format!(
                "{:.6}(s) elapsed",
                started.elapsed().as_secs_f64()
            ));
            ExitCode::Success
        }
        Err(e) => fail(formatter, &e),
    }
}

/// Report an error and pick the matching exit code
fn fail(formatter: &Formatter, error: &Error) -> ExitCode {
    match error {
        Error::UnknownCommand(_) => {
            formatter.error(&format!("{error}. Use `ossctl help` to list commands."))
        }
        Error::ArgumentCount { command, .. } | Error::UnsupportedOption { command, .. } => {
            formatter.error(&format!(
                "{error}. Use `ossctl help {command}` for usage."
            ))
        }
        _ => formatter.error(&error.to_string()),
    }
    ExitCode::from(error)
}

/// `--loglevel`, else the level in the configuration file
///
/// A configuration file that fails to load is ignored here and reported when
/// a command connects.
fn log_level(options: &OptionMap) -> Option<String> {
    if let Some(level) = options.get(&OptionKey::LogLevel) {
        return Some(level.clone());
    }
    ConfigManager::for_options(options)
        .and_then(|manager| manager.load())
        .ok()?
        .defaults
        .log_level
}

/// `-L` value among the tokens of `<command> --help -L zh`
fn help_language(tokens: &[String]) -> Option<String> {
    let tokens = tokens
        .iter()
        .filter(|t| t.as_str() != "-h" && t.as_str() != "--help");
    ParsedInvocation::parse(tokens)
        .ok()
        .and_then(|parsed| parsed.option(OptionKey::Language).map(str::to_string))
}
