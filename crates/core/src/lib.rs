//! ossctl-core: command dispatch framework for the ossctl CLI
//!
//! This crate provides the core functionality for ossctl, including:
//! - The global option catalog and invocation parsing
//! - Command descriptors, the behavior contract and the registry
//! - Dispatch with argument and option validation
//! - Bilingual help rendering
//! - Configuration loading and per-invocation settings
//! - The BucketConfigStore trait for storage-service operations
//!
//! This crate does not talk to the network, so commands can be tested against
//! a mocked store.

pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod invocation;
pub mod locale;
pub mod option;
pub mod registry;
pub mod resource;
pub mod store;

pub use command::{
    is_affirmative, CommandBehavior, CommandDescriptor, CommandGroup, Confirm, HelpText,
    RunContext,
};
pub use config::{Config, ConfigManager, Settings};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use help::HelpFormatter;
pub use invocation::ParsedInvocation;
pub use locale::Locale;
pub use option::{OptionKey, OptionKind, OptionMap};
pub use registry::CommandRegistry;
pub use resource::{parse_cloud_url, CloudUrl};
pub use store::{BucketConfigStore, ConfigKind, StoreConnector};
