//! Command registry
//!
//! Owns every behavior object and maps command names and aliases to them.
//! Filled once at startup; lookups afterwards never change the mapping.

use std::collections::HashMap;

use crate::command::{CommandBehavior, CommandDescriptor};
use crate::error::{Error, Result};
use crate::locale::Locale;

/// Name and alias lookup over registered commands
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn CommandBehavior>>,
    index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its name and aliases
    ///
    /// Nothing is registered when any name collides or the descriptor is invalid.
    pub fn register(&mut self, behavior: Box<dyn CommandBehavior>) -> Result<()> {
        let descriptor = behavior.descriptor();
        validate_descriptor(descriptor)?;

        let mut names: Vec<&'static str> = Vec::new();
        for name in descriptor.names() {
            if self.index.contains_key(name) || names.contains(&name) {
                return Err(Error::DuplicateCommand(name.to_string()));
            }
            names.push(name);
        }

        tracing::trace!(command = descriptor.name, aliases = ?descriptor.aliases, "registered command");

        let slot = self.commands.len();
        self.index.extend(names.into_iter().map(|name| (name, slot)));
        self.commands.push(behavior);
        Ok(())
    }

    /// Find a command by exact, case-sensitive name or alias
    pub fn resolve(&self, name: &str) -> Result<&dyn CommandBehavior> {
        let slot = self.slot(name)?;
        Ok(self.commands[slot].as_ref())
    }

    /// Mutable lookup, used to run a command
    pub fn resolve_mut(&mut self, name: &str) -> Result<&mut dyn CommandBehavior> {
        let slot = self.slot(name)?;
        Ok(self.commands[slot].as_mut())
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter().map(|c| c.descriptor())
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn slot(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))
    }
}

fn validate_descriptor(descriptor: &CommandDescriptor) -> Result<()> {
    let invalid = |reason: String| Error::InvalidDescriptor {
        name: descriptor.name.to_string(),
        reason,
    };

    if descriptor.name.is_empty() {
        return Err(invalid("command name is empty".into()));
    }
    if descriptor.min_args > descriptor.max_args {
        return Err(invalid(format!(
            "min_args {} exceeds max_args {}",
            descriptor.min_args, descriptor.max_args
        )));
    }
    if !descriptor.help.iter().any(|(l, _)| *l == Locale::PRIMARY) {
        return Err(invalid(format!(
            "no help text for primary locale '{}'",
            Locale::PRIMARY
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandGroup, HelpText, RunContext};
    use crate::option::{OptionKey, OptionMap};
    use async_trait::async_trait;

    const HELP: &[(Locale, HelpText)] = &[(
        Locale::English,
        HelpText {
            synopsis: "test command",
            param: "",
            syntax: "",
            detail: "",
            sample: "",
        },
    )];

    struct Stub(CommandDescriptor);

    #[async_trait]
    impl CommandBehavior for Stub {
        fn descriptor(&self) -> &CommandDescriptor {
            &self.0
        }

        fn init(&mut self, _args: &[String], _options: &OptionMap) -> Result<()> {
            Ok(())
        }

        async fn run(&mut self, _ctx: &mut RunContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    fn stub(name: &'static str, aliases: &'static [&'static str]) -> Box<dyn CommandBehavior> {
        Box::new(Stub(CommandDescriptor {
            name,
            aliases,
            min_args: 0,
            max_args: 1,
            allowed_options: &[OptionKey::Method],
            group: CommandGroup::Normal,
            help: HELP,
        }))
    }

    #[test]
    fn test_resolve_name_and_alias_same_command() {
        let mut registry = CommandRegistry::new();
        registry.register(stub("cors", &["bucket-cors", "cr"])).unwrap();
        registry.register(stub("website", &[])).unwrap();

        let by_name = registry.resolve("cors").unwrap();
        for alias in ["bucket-cors", "cr"] {
            let by_alias = registry.resolve(alias).unwrap();
            assert!(std::ptr::addr_eq(by_name, by_alias));
            assert_eq!(by_alias.descriptor().name, "cors");
        }
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let mut registry = CommandRegistry::new();
        registry.register(stub("cors", &[])).unwrap();
        assert!(matches!(
            registry.resolve("CORS"),
            Err(Error::UnknownCommand(ref name)) if name == "CORS"
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = CommandRegistry::new();
        registry.register(stub("cors", &[])).unwrap();
        let err = registry.register(stub("cors", &[])).unwrap_err();
        assert!(matches!(err, Error::DuplicateCommand(ref name) if name == "cors"));
    }

    #[test]
    fn test_alias_colliding_with_name_rejected() {
        let mut registry = CommandRegistry::new();
        registry.register(stub("cors", &[])).unwrap();
        let err = registry.register(stub("website", &["cors"])).unwrap_err();
        assert!(matches!(err, Error::DuplicateCommand(_)));
        // The failed registration leaves nothing behind
        assert!(registry.resolve("website").is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_alias_equal_to_own_name_rejected() {
        let mut registry = CommandRegistry::new();
        let err = registry
            .register(stub("response-header", &["response-header"]))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateCommand(_)));
    }

    #[test]
    fn test_min_above_max_rejected() {
        let mut registry = CommandRegistry::new();
        let err = registry
            .register(Box::new(Stub(CommandDescriptor {
                name: "broken",
                aliases: &[],
                min_args: 3,
                max_args: 1,
                allowed_options: &[],
                group: CommandGroup::Normal,
                help: HELP,
            })))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDescriptor { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_primary_help_rejected() {
        let mut registry = CommandRegistry::new();
        let err = registry
            .register(Box::new(Stub(CommandDescriptor {
                name: "quiet",
                aliases: &[],
                min_args: 0,
                max_args: 0,
                allowed_options: &[],
                group: CommandGroup::Normal,
                help: &[(
                    Locale::Chinese,
                    HelpText {
                        synopsis: "测试",
                        param: "",
                        syntax: "",
                        detail: "",
                        sample: "",
                    },
                )],
            })))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_descriptors_in_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register(stub("b", &[])).unwrap();
        registry.register(stub("a", &[])).unwrap();
        let names: Vec<_> = registry.descriptors().map(|d| d.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
