//! Flag definitions and their typed builders.
//!
//! [`Flag`] is the typed front door: it fixes the value type at compile time
//! so defaults and validators agree with the declared [`FlagKind`]. It erases
//! into a [`FlagDefinition`], the form the resolver and aggregator consume,
//! so flags of different types can share one [`crate::FlagSet`].

mod kind;
mod validator;

use std::{future::Future, marker::PhantomData};

pub use kind::{FlagKind, FlagType, FlagValue};
pub use validator::{Validator, Validity};

/// Type-erased description of one configurable value.
#[derive(Clone, Debug)]
pub struct FlagDefinition {
    name: String,
    alias: Option<String>,
    envars: Vec<String>,
    kind: FlagKind,
    default: Option<FlagValue>,
    validator: Option<Validator>,
}

impl FlagDefinition {
    /// Start an untyped definition for `name` of the given `kind`.
    ///
    /// Prefer [`Flag`] unless the kind is only known at runtime.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FlagKind) -> Self {
        Self {
            name: name.into(),
            alias: None,
            envars: Vec::new(),
            kind,
            default: None,
            validator: None,
        }
    }

    /// Key of the flag in the argument map and in the output configuration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Secondary argument key, if declared.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Environment variables probed in declaration order.
    #[must_use]
    pub fn envars(&self) -> &[String] {
        &self.envars
    }

    /// Declared target type.
    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        self.kind
    }

    /// Value used when no source matches.
    #[must_use]
    pub const fn default_value(&self) -> Option<&FlagValue> {
        self.default.as_ref()
    }

    /// Predicate run over sourced values.
    #[must_use]
    pub const fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    /// Set the secondary argument key.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Append an environment variable to probe.
    #[must_use]
    pub fn with_env(mut self, var: impl Into<String>) -> Self {
        self.envars.push(var.into());
        self
    }

    /// Set the default value.
    ///
    /// Defaults are trusted: they bypass coercion and validation. The caller
    /// is responsible for matching the declared kind.
    #[must_use]
    pub fn with_default(mut self, value: FlagValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Set the validator.
    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// Typed builder for a [`FlagDefinition`].
///
/// # Examples
///
/// ```
/// use flagwise::{Flag, FlagDefinition, Validity};
///
/// let port: FlagDefinition = Flag::number("port")
///     .alias("p")
///     .env("APP_PORT")
///     .env("PORT")
///     .default_value(8080)
///     .validator(|p: f64| async move {
///         if p > 0.0 { Validity::Valid } else { Validity::invalid("port must be positive") }
///     })
///     .into();
/// assert_eq!(port.envars(), ["APP_PORT", "PORT"]);
/// ```
#[derive(Clone, Debug)]
pub struct Flag<T> {
    definition: FlagDefinition,
    marker: PhantomData<fn() -> T>,
}

impl Flag<String> {
    /// Declare a string flag; raw values pass through unchanged.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::typed(name)
    }
}

impl Flag<bool> {
    /// Declare a boolean flag.
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::typed(name)
    }
}

impl Flag<f64> {
    /// Declare a numeric flag.
    #[must_use]
    pub fn number(name: impl Into<String>) -> Self {
        Self::typed(name)
    }
}

impl<T: FlagType> Flag<T> {
    fn typed(name: impl Into<String>) -> Self {
        Self {
            definition: FlagDefinition::new(name, T::KIND),
            marker: PhantomData,
        }
    }

    /// Set the secondary argument key.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.definition = self.definition.with_alias(alias);
        self
    }

    /// Append an environment variable; earlier declarations win.
    #[must_use]
    pub fn env(mut self, var: impl Into<String>) -> Self {
        self.definition = self.definition.with_env(var);
        self
    }

    /// Append several environment variables in order.
    #[must_use]
    pub fn envars<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition.envars.extend(vars.into_iter().map(Into::into));
        self
    }

    /// Set the value used when no source matches.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<T>) -> Self {
        self.definition = self.definition.with_default(value.into().into_value());
        self
    }

    /// Attach an asynchronous validator run over sourced values.
    #[must_use]
    pub fn validator<F, Fut>(mut self, check: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Validity> + Send + 'static,
    {
        self.definition = self.definition.with_validator(Validator::new(check));
        self
    }

    /// Erase the type parameter.
    #[must_use]
    pub fn build(self) -> FlagDefinition {
        self.definition
    }
}

impl<T: FlagType> From<Flag<T>> for FlagDefinition {
    fn from(flag: Flag<T>) -> Self {
        flag.build()
    }
}

#[cfg(test)]
mod tests;
