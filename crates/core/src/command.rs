//! Command descriptors and the behavior contract
//!
//! A [`CommandDescriptor`] is the static metadata of a sub-command: names,
//! argument range, accepted options and help text. A [`CommandBehavior`] is the
//! object that actually runs it. The dispatcher validates an invocation against
//! the descriptor before handing it to the behavior.

use std::io::Write;

use async_trait::async_trait;

use crate::error::Result;
use crate::locale::Locale;
use crate::option::{OptionKey, OptionMap};
use crate::store::StoreConnector;

/// Section a command is listed under in catalog help
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Normal,
    Additional,
}

impl CommandGroup {
    /// Groups in the order they are listed
    pub const ALL: [CommandGroup; 2] = [CommandGroup::Normal, CommandGroup::Additional];
}

/// Help text of one command in one language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpText {
    /// One-line summary shown in catalog help
    pub synopsis: &'static str,
    /// Parameter summary, e.g. `bucket_url [local_file] [options]`
    pub param: &'static str,
    /// Usage lines
    pub syntax: &'static str,
    /// Full description
    pub detail: &'static str,
    /// Examples
    pub sample: &'static str,
}

/// Static metadata for one sub-command
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub min_args: usize,
    pub max_args: usize,
    pub allowed_options: &'static [OptionKey],
    pub group: CommandGroup,
    pub help: &'static [(Locale, HelpText)],
}

impl CommandDescriptor {
    /// Help text for a locale, falling back to the primary locale
    pub fn help_text(&self, locale: Locale) -> Option<&HelpText> {
        self.help_for(locale)
            .or_else(|| self.help_for(Locale::PRIMARY))
    }

    fn help_for(&self, locale: Locale) -> Option<&HelpText> {
        self.help
            .iter()
            .find(|(l, _)| *l == locale)
            .map(|(_, text)| text)
    }

    /// Whether the command accepts an option
    pub fn allows(&self, key: OptionKey) -> bool {
        self.allowed_options.contains(&key)
    }

    /// Every name the command answers to, canonical name first
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

/// Interactive yes/no question
pub trait Confirm: Send + Sync {
    /// Ask the question; anything but an explicit yes is a no
    fn confirm(&self, prompt: &str) -> bool;
}

/// Whether a confirmation answer means yes: `y` or `yes`, any case
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Everything a behavior may touch while running
pub struct RunContext<'a> {
    /// Opens the storage-service client
    pub connector: &'a dyn StoreConnector,
    /// Answers overwrite prompts
    pub confirm: &'a dyn Confirm,
    /// Standard output stream
    pub stdout: &'a mut (dyn Write + Send),
}

/// Polymorphic per-command implementation
///
/// `init` parses and validates command-specific arguments and replaces any
/// state from a previous invocation. `run` performs the side effects.
#[async_trait]
pub trait CommandBehavior: Send + Sync {
    /// Static metadata of the command
    fn descriptor(&self) -> &CommandDescriptor;

    /// Capture per-invocation state from validated arguments and options
    fn init(&mut self, args: &[String], options: &OptionMap) -> Result<()>;

    /// Execute the command
    async fn run(&mut self, ctx: &mut RunContext<'_>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH: HelpText = HelpText {
        synopsis: "english synopsis",
        param: "",
        syntax: "",
        detail: "",
        sample: "",
    };

    const DESCRIPTOR: CommandDescriptor = CommandDescriptor {
        name: "demo",
        aliases: &["dm"],
        min_args: 1,
        max_args: 2,
        allowed_options: &[OptionKey::Method],
        group: CommandGroup::Normal,
        help: &[(Locale::English, ENGLISH)],
    };

    #[test]
    fn test_help_text_falls_back_to_primary() {
        assert_eq!(
            DESCRIPTOR.help_text(Locale::Chinese).unwrap().synopsis,
            "english synopsis"
        );
        assert_eq!(
            DESCRIPTOR.help_text(Locale::English).unwrap().synopsis,
            "english synopsis"
        );
    }

    #[test]
    fn test_allows() {
        assert!(DESCRIPTOR.allows(OptionKey::Method));
        assert!(!DESCRIPTOR.allows(OptionKey::Endpoint));
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = DESCRIPTOR.names().collect();
        assert_eq!(names, vec!["demo", "dm"]);
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("yes\n"));
        assert!(is_affirmative("YeS"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }
}
