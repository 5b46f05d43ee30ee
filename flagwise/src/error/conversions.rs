//! Trait-based conversions between external error types and `FlagError`.

use figment::Error as FigmentError;

use super::FlagError;

impl From<clap::Error> for FlagError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(e.into())
    }
}

impl From<FigmentError> for FlagError {
    fn from(e: FigmentError) -> Self {
        Self::Gathering(e.into())
    }
}
