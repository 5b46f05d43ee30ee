//! Aggregation container and iteration support for multiple `FlagError` values.

use std::{error::Error, fmt, sync::Arc};

use super::FlagError;

/// Collection of [`FlagError`]s produced during a single aggregation.
///
/// Displays as every message joined with `", "`, in definition order.
///
/// # Examples
///
/// ```
/// use flagwise::FlagError;
/// let e = FlagError::aggregate(vec![
///     FlagError::MissingValue { name: "port".into() },
///     FlagError::ValidationFailed { name: "host".into(), message: "unreachable".into() },
/// ]);
/// if let FlagError::Aggregate(agg) = &e {
///     assert_eq!(agg.len(), 2);
/// }
/// assert_eq!(e.to_string(), "Could not assign port, unreachable");
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<FlagError>>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<FlagError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &FlagError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the flags that failed, skipping errors not tied to one flag.
    pub fn flag_names(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(FlagError::flag_name)
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a FlagError;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Arc<FlagError>>,
        fn(&'a Arc<FlagError>) -> &'a FlagError,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(Arc::as_ref)
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<FlagError>;
    type IntoIter = std::vec::IntoIter<Arc<FlagError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
