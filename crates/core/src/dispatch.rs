//! Invocation dispatch
//!
//! Resolves a command, checks the invocation against its descriptor and runs
//! the two-phase behavior contract. Every failure is terminal: nothing is
//! retried and a validation error stops the invocation before `init`.

use crate::command::{CommandDescriptor, RunContext};
use crate::error::{Error, Result};
use crate::invocation::ParsedInvocation;
use crate::registry::CommandRegistry;

/// Runs invocations against a registry
pub struct Dispatcher {
    registry: CommandRegistry,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    /// The registry commands are resolved from
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Validate and run one invocation
    pub async fn dispatch(
        &mut self,
        command: &str,
        invocation: &ParsedInvocation,
        ctx: &mut RunContext<'_>,
    ) -> Result<()> {
        let behavior = self.registry.resolve_mut(command)?;
        validate(behavior.descriptor(), invocation)?;

        tracing::debug!(
            command = behavior.descriptor().name,
            args = invocation.args.len(),
            "initializing command"
        );
        behavior.init(&invocation.args, &invocation.options)?;

        tracing::debug!(command = behavior.descriptor().name, "running command");
        behavior.run(ctx).await
    }
}

/// Check argument count, then option membership, failing on the first violation
pub fn validate(descriptor: &CommandDescriptor, invocation: &ParsedInvocation) -> Result<()> {
    let got = invocation.args.len();
    if got < descriptor.min_args || got > descriptor.max_args {
        return Err(Error::ArgumentCount {
            command: descriptor.name.to_string(),
            got,
            min: descriptor.min_args,
            max: descriptor.max_args,
        });
    }

    if let Some(&key) = invocation.options.keys().find(|k| !descriptor.allows(**k)) {
        return Err(Error::UnsupportedOption {
            command: descriptor.name.to_string(),
            key,
        });
    }

    Ok(())
}
