//! Asynchronous, caller-supplied validators.

use std::{fmt, future::Future, sync::Arc};

use futures::future::{self, BoxFuture, FutureExt};

use super::kind::{FlagType, FlagValue};

/// Verdict returned by a validator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Validity {
    /// The value is acceptable.
    Valid,
    /// The value is rejected; the message is surfaced verbatim.
    Invalid(String),
}

impl Validity {
    /// Reject with `message`.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Returns `true` for [`Validity::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl<E: fmt::Display> From<Result<(), E>> for Validity {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(e) => Self::Invalid(e.to_string()),
        }
    }
}

type CheckFn = dyn Fn(FlagValue) -> BoxFuture<'static, Validity> + Send + Sync;

/// Type-erased asynchronous predicate over a coerced [`FlagValue`].
///
/// Cloning is cheap; clones share the same predicate.
#[derive(Clone)]
pub struct Validator(Arc<CheckFn>);

impl Validator {
    /// Wrap a predicate over values of type `T`.
    ///
    /// The predicate receives an owned copy of the coerced value and may
    /// suspend, for example while probing the filesystem or network.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagwise::{Validator, Validity};
    /// let non_empty = Validator::new(|v: String| async move {
    ///     if v.is_empty() { Validity::invalid("empty") } else { Validity::Valid }
    /// });
    /// let _ = non_empty;
    /// ```
    pub fn new<T, F, Fut>(check: F) -> Self
    where
        T: FlagType,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Validity> + Send + 'static,
    {
        Self(Arc::new(move |value: FlagValue| match T::from_value(&value) {
            Some(typed) => check(typed).boxed(),
            None => future::ready(Validity::Invalid(format!(
                "expected a {} value, got {value}",
                T::KIND
            )))
            .boxed(),
        }))
    }

    /// Run the predicate over `value`.
    #[must_use = "the returned future must be awaited to obtain a verdict"]
    pub fn check(&self, value: FlagValue) -> BoxFuture<'static, Validity> {
        (self.0)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(<predicate>)")
    }
}
