//! Error types for the `hello_flags` demo.
use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised by the demo binary.
#[derive(Debug, Error)]
pub enum HelloFlagsError {
    /// One or more flags could not be resolved.
    #[error("failed to resolve flags: {0}")]
    Flags(#[from] Arc<flagwise::FlagError>),
    /// Writing the configuration to standard output failed.
    #[error("failed to write configuration: {0}")]
    Output(#[from] io::Error),
}

/// Convenience alias for results in the demo.
pub type Result<T> = std::result::Result<T, HelloFlagsError>;
