//! Output formatting utilities
//!
//! This module provides the formatter for CLI output in both human-readable
//! and JSON formats. Command payloads written to stdout never pass through it.

mod formatter;

pub use formatter::Formatter;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
