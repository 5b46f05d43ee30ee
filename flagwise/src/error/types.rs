//! Primary error enum for flag resolution flows.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::FlagKind;

/// Errors that can occur while resolving flags.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// No argument, alias, environment variable, or default supplied a value.
    #[error("Could not assign {name}")]
    MissingValue {
        /// Name of the unresolved flag.
        name: String,
    },

    /// A textual value could not be converted to the declared type.
    #[error("Invalid {kind} value for '{name}': {value:?}")]
    CoercionFailed {
        /// Name of the flag whose value was rejected.
        name: String,
        /// Declared target type.
        kind: FlagKind,
        /// Raw text that failed conversion.
        value: String,
    },

    /// The caller-supplied validator rejected the coerced value.
    ///
    /// Displays the validator's reason verbatim.
    #[error("{message}")]
    ValidationFailed {
        /// Name of the flag whose value was rejected.
        name: String,
        /// Human-readable explanation supplied by the validator.
        message: String,
    },

    /// Two definitions passed to one aggregation share a name.
    #[error("Duplicate flag name '{name}'")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// Error tokenising command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// Error while handing candidates to the schema engine.
    #[error("Failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// One or more flags failed during a single aggregation.
    #[error("{0}")]
    Aggregate(Box<AggregatedErrors>),
}

impl FlagError {
    /// Name of the flag this error concerns, when it concerns exactly one.
    #[must_use]
    pub fn flag_name(&self) -> Option<&str> {
        match self {
            Self::MissingValue { name }
            | Self::CoercionFailed { name, .. }
            | Self::ValidationFailed { name, .. }
            | Self::DuplicateName { name } => Some(name),
            Self::CliParsing(_) | Self::Gathering(_) | Self::Aggregate(_) => None,
        }
    }
}
