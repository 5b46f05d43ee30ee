//! Extensions for mapping errors to `FlagwiseResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(FlagError::from(e)))`
//! patterns when converting external error types into the crate's
//! `FlagwiseResult<T>` alias (`Result<T, Arc<FlagError>>`).
//!
//! # Examples
//!
//! ```
//! use flagwise::{FlagwiseResult, IntoFlagwise};
//!
//! fn extract() -> FlagwiseResult<u16> {
//!     // figment::Error implements Into<FlagError>
//!     Err::<u16, _>(figment::Error::from("boom")).into_flagwise()
//! }
//! assert!(extract().is_err());
//! ```

use std::sync::Arc;

use crate::FlagError;

/// Result type used across the crate's public operations.
pub type FlagwiseResult<T> = Result<T, Arc<FlagError>>;

/// Generic extension for mapping any `Result<T, E>` with `E: Into<FlagError>`
/// into a `FlagwiseResult<T>`.
pub trait IntoFlagwise<T, E> {
    /// Convert `Result<T, E>` into `FlagwiseResult<T>` using `Into<FlagError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<FlagError>`.
    fn into_flagwise(self) -> FlagwiseResult<T>;
}

impl<T, E> IntoFlagwise<T, E> for Result<T, E>
where
    E: Into<FlagError>,
{
    fn into_flagwise(self) -> FlagwiseResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
