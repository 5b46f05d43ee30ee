//! Constructors and aggregation helpers for `FlagError`.

use std::sync::Arc;

use figment::Error as FigmentError;

use super::{AggregatedErrors, FlagError};

impl FlagError {
    /// Tries to build a [`FlagError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] containing that single [`Arc`] when the error is already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.is_empty() {
            return None;
        }
        Some(if arcs.len() == 1 {
            let last = arcs.pop()?;
            match Arc::try_unwrap(last) {
                Ok(err) => err,
                Err(shared) => Self::combined(vec![shared]),
            }
        } else {
            Self::combined(arcs)
        })
    }

    /// Build a [`FlagError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`FlagError::try_aggregate`] to avoid
    /// panicking when the error list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Wrap `errors` in [`Self::Aggregate`] regardless of how many there are.
    ///
    /// The aggregator reports through this form so callers always match the
    /// same variant, even when only one flag failed.
    #[must_use]
    pub fn combined(errors: Vec<Arc<Self>>) -> Self {
        Self::Aggregate(Box::new(AggregatedErrors::new(errors)))
    }

    /// Construct a missing-value error for `name`.
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingValue { name: name.into() }
    }

    /// Construct a validation error carrying the validator's `message`.
    #[must_use]
    pub fn validation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flagwise::FlagError;
    /// let fe = figment::Error::from("boom");
    /// let e = FlagError::gathering(fe);
    /// assert!(matches!(e, FlagError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }
}
