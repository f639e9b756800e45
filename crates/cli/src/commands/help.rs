//! help command - Show the command catalog or the help of one command

use std::fmt;

use clap::Args;
use ossctl_core::{
    CommandRegistry, Error, HelpFormatter, Locale, OptionMap, Result, Settings,
};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Show all commands or the detailed help of one command
#[derive(Args, Debug, Default)]
pub struct HelpArgs {
    /// Command to describe; all commands are listed when omitted
    pub command: Option<String>,

    /// Help language: en or zh
    #[arg(short = 'L', long)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
struct HelpOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    language: &'static str,
    text: String,
}

impl fmt::Display for HelpOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.trim_end())
    }
}

/// Execute the help command
pub fn execute(args: HelpArgs, registry: &CommandRegistry, formatter: &Formatter) -> ExitCode {
    let locale = match help_locale(args.language.as_deref()) {
        Ok(locale) => locale,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };
    let help = HelpFormatter::new(locale);

    let text = match args.command.as_deref() {
        None => help.format_catalog(registry),
        Some(name) => match registry.resolve(name) {
            Ok(behavior) => help.format_detail(behavior.descriptor()),
            Err(e) => {
                formatter.error(&format!("{e}. Use `ossctl help` to list commands."));
                return ExitCode::from(&e);
            }
        },
    };

    formatter.output(&HelpOutput {
        command: args.command,
        language: locale.as_str(),
        text,
    });
    ExitCode::Success
}

/// `-L` wins, then the configured default language, then the primary locale
fn help_locale(language: Option<&str>) -> Result<Locale> {
    if let Some(value) = language {
        return Locale::parse(value).ok_or_else(|| {
            Error::Config(format!("unsupported language '{value}', use en or zh"))
        });
    }

    match Settings::load(&OptionMap::new()) {
        Ok(settings) => Ok(settings.language),
        Err(e) => {
            tracing::debug!(error = %e, "configuration unavailable, using the primary locale");
            Ok(Locale::PRIMARY)
        }
    }
}
