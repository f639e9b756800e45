//! Error types for ossctl-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use std::path::PathBuf;

use thiserror::Error;

use crate::option::OptionKey;

/// Result type alias for ossctl-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ossctl-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// No command is registered under the name or alias
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A command name or alias is already registered
    #[error("Command name or alias already registered: {0}")]
    DuplicateCommand(String),

    /// A descriptor violates a registration invariant
    #[error("Invalid descriptor for command '{name}': {reason}")]
    InvalidDescriptor { name: String, reason: String },

    /// Positional argument count outside the accepted range
    #[error("Command '{command}' takes {min} to {max} argument(s), got {got}")]
    ArgumentCount {
        command: String,
        got: usize,
        min: usize,
        max: usize,
    },

    /// Option name not present in the global catalog
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// Value option given without a value
    #[error("Option --{0} requires a value")]
    MissingOptionValue(String),

    /// Option known globally but not accepted by this command
    #[error("Command '{command}' does not support option --{key}")]
    UnsupportedOption { command: String, key: OptionKey },

    /// --method unset or empty
    #[error("--method value is empty")]
    MissingMethod,

    /// --method outside put|get|delete
    #[error("--method value '{0}' is not one of: put|get|delete")]
    InvalidMethod(String),

    /// put without a local payload file argument
    #[error("put requires a local file argument")]
    MissingPayload,

    /// Payload file does not exist
    #[error("Local file not found: {}", .0.display())]
    PayloadNotFound(PathBuf),

    /// Payload path is a directory
    #[error("{} is a directory, not a file", .0.display())]
    PayloadIsDirectory(PathBuf),

    /// Payload file has zero length
    #[error("{} is an empty file", .0.display())]
    EmptyPayload(PathBuf),

    /// Payload content rejected by the command
    #[error("Invalid payload in {}: {reason}", .path.display())]
    InvalidPayload { path: PathBuf, reason: String },

    /// Resource locator could not be resolved to a bucket
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Feature not supported by backend
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::UnknownCommand(_)
            | Error::ArgumentCount { .. }
            | Error::UnknownOption(_)
            | Error::MissingOptionValue(_)
            | Error::UnsupportedOption { .. }
            | Error::MissingMethod
            | Error::InvalidMethod(_)
            | Error::MissingPayload
            | Error::PayloadNotFound(_)
            | Error::PayloadIsDirectory(_)
            | Error::EmptyPayload(_)
            | Error::InvalidPayload { .. }
            | Error::InvalidResource(_)
            | Error::InvalidUrl(_)
            | Error::Config(_) => 2, // UsageError
            Error::Network(_) => 3,              // NetworkError
            Error::Auth(_) => 4,                 // AuthError
            Error::NotFound(_) => 5,             // NotFound
            Error::Conflict(_) => 6,             // Conflict
            Error::UnsupportedFeature(_) => 7,   // UnsupportedFeature
            _ => 1,                              // GeneralError
        }
    }
}
