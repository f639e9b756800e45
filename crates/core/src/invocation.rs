//! Invocation parsing
//!
//! Splits the tokens that follow a command name into positional arguments and
//! catalog options. The parser is a clap [`Command`] built at runtime from the
//! option catalog; which options a command actually accepts is checked later
//! by the dispatcher.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::{Error, Result};
use crate::option::{CATALOG, OptionKey, OptionKind, OptionMap, OptionSpec};

/// Clap id of the positional arguments
const POSITIONAL: &str = "args";

/// Positional arguments and options of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInvocation {
    pub args: Vec<String>,
    pub options: OptionMap,
}

impl ParsedInvocation {
    /// Build an invocation directly, bypassing token parsing
    pub fn new(args: Vec<String>, options: OptionMap) -> Self {
        Self { args, options }
    }

    /// Parse raw tokens
    ///
    /// Accepts `--name=value`, `--name value`, `-x value` and `-x=value`.
    /// Flags take no value unless written as `--flag=value`. Everything after
    /// `--` is positional. When an option repeats, the last value wins.
    pub fn parse<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let matches = parser()
            .try_get_matches_from(tokens.into_iter().map(Into::<String>::into))
            .map_err(parse_error)?;

        Ok(Self::from_matches(&matches))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let args = matches
            .get_many::<String>(POSITIONAL)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let options = CATALOG
            .iter()
            .filter_map(|spec| {
                matches
                    .get_one::<String>(spec.name)
                    .map(|value| (spec.key, value.clone()))
            })
            .collect();

        Self { args, options }
    }

    /// Value of an option, if given
    pub fn option(&self, key: OptionKey) -> Option<&str> {
        self.options.get(&key).map(String::as_str)
    }

    /// Whether a help switch appears among the raw tokens
    pub fn wants_help<S: AsRef<str>>(tokens: &[S]) -> bool {
        tokens
            .iter()
            .map(AsRef::as_ref)
            .take_while(|t| *t != "--")
            .any(|t| t == "-h" || t == "--help")
    }
}

/// Parser accepting every catalog option
fn parser() -> Command {
    let command = Command::new("ossctl")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .arg(
            Arg::new(POSITIONAL)
                .value_name("ARG")
                .action(ArgAction::Append),
        );

    CATALOG
        .iter()
        .fold(command, |command, spec| command.arg(catalog_arg(spec)))
}

fn catalog_arg(spec: &OptionSpec) -> Arg {
    let arg = Arg::new(spec.name)
        .long(spec.name)
        .short(spec.short)
        .action(ArgAction::Set);

    match spec.kind {
        OptionKind::Value => arg.value_name("value"),
        // `--flag` records "true"; `--flag=false` is still accepted
        OptionKind::Flag => arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
    }
}

fn parse_error(err: clap::Error) -> Error {
    let invalid = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.as_str(),
        _ => "",
    };
    let name = invalid.split([' ', '=']).next().unwrap_or_default();

    match err.kind() {
        ErrorKind::UnknownArgument => Error::UnknownOption(name.to_string()),
        _ => match option_named(name) {
            Some(key) => Error::MissingOptionValue(key.name().to_string()),
            None => Error::General(err.to_string()),
        },
    }
}

/// Catalog entry for `--name` or `-x`
fn option_named(name: &str) -> Option<OptionKey> {
    if let Some(long) = name.strip_prefix("--") {
        return OptionKey::from_name(long);
    }
    let mut chars = name.strip_prefix('-')?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => OptionKey::from_short(c),
        _ => None,
    }
}
