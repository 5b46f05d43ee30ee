//! Concurrent resolution of many flags into one configuration.
//!
//! Every definition resolves independently. All resolutions are started
//! together and awaited to completion with a settle-all join, so one
//! failing flag never hides another: either every flag succeeds and a
//! [`Configuration`] is returned, or every failure is reported in a single
//! [`FlagError::Aggregate`] and no partial configuration escapes.

use std::collections::HashSet;
use std::ffi::OsString;
use std::sync::Arc;

use futures::future::join_all;

use crate::resolve::resolve;
use crate::source::{Environment, ProcessEnv};
use crate::{Configuration, FlagDefinition, FlagError, FlagwiseResult, RawSourceMap};

/// An ordered collection of flag definitions with unique names.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use futures::executor::block_on;
/// use flagwise::{Flag, FlagSet, RawSourceMap};
///
/// let flags = FlagSet::new()
///     .with(Flag::string("foo").alias("f").env("FOO"))
///     .with(Flag::number("port").env("PORT").default_value(8080));
/// let args = RawSourceMap::from_pairs([("f", "x")]);
/// let config = block_on(flags.compile_with_env(&args, &HashMap::<String, String>::new()))?;
/// assert_eq!(config.get_str("foo"), Some("x"));
/// assert_eq!(config.get_number("port"), Some(8080.0));
/// # Ok::<(), std::sync::Arc<flagwise::FlagError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct FlagSet {
    definitions: Vec<FlagDefinition>,
}

impl FlagSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    /// Append a definition, builder style.
    #[must_use]
    pub fn with(mut self, definition: impl Into<FlagDefinition>) -> Self {
        self.add(definition);
        self
    }

    /// Append a definition.
    pub fn add(&mut self, definition: impl Into<FlagDefinition>) {
        self.definitions.push(definition.into());
    }

    /// Definitions in declaration order.
    #[must_use]
    pub fn definitions(&self) -> &[FlagDefinition] {
        &self.definitions
    }

    /// Number of definitions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` when the set has no definitions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Fail on the first repeated flag name.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::DuplicateName`] naming the repeated flag.
    pub fn ensure_unique(&self) -> Result<(), FlagError> {
        let mut seen = HashSet::new();
        match self
            .definitions
            .iter()
            .map(FlagDefinition::name)
            .find(|name| !seen.insert(*name))
        {
            Some(name) => Err(FlagError::DuplicateName {
                name: name.to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Tokenise `argv` (without the program name) into a [`RawSourceMap`].
    ///
    /// # Errors
    ///
    /// See [`RawSourceMap::parse_from`].
    pub fn tokenize<I, T>(&self, argv: I) -> FlagwiseResult<RawSourceMap>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        RawSourceMap::parse_from(&self.definitions, argv)
    }

    /// Resolve every flag against `args` and the process environment.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::compile_with_env`].
    pub async fn compile(&self, args: &RawSourceMap) -> FlagwiseResult<Configuration> {
        self.compile_with_env(args, &ProcessEnv).await
    }

    /// Tokenise `argv` and resolve every flag against the process environment.
    ///
    /// # Errors
    ///
    /// Returns tokenizer errors from [`FlagSet::tokenize`], otherwise see
    /// [`FlagSet::compile_with_env`].
    pub async fn compile_args<I, T>(&self, argv: I) -> FlagwiseResult<Configuration>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = self.tokenize(argv)?;
        self.compile(&args).await
    }

    /// Resolve every flag against `args` and `env`.
    ///
    /// Resolutions run concurrently on the caller's task and are all awaited,
    /// even after one has failed. A validator that never completes therefore
    /// stalls the whole call.
    ///
    /// # Errors
    ///
    /// * [`FlagError::DuplicateName`] before any resolution starts when two
    ///   definitions share a name.
    /// * [`FlagError::Aggregate`] holding one entry per failed flag, in
    ///   definition order, when any flag fails. Its message joins the
    ///   individual messages with `", "`.
    pub async fn compile_with_env<E>(
        &self,
        args: &RawSourceMap,
        env: &E,
    ) -> FlagwiseResult<Configuration>
    where
        E: Environment + ?Sized,
    {
        self.ensure_unique().map_err(Arc::new)?;
        let outcomes = join_all(
            self.definitions
                .iter()
                .map(|definition| resolve(definition, args, env)),
        )
        .await;

        let mut builder = Configuration::builder();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(resolved) => builder.insert(resolved),
                Err(err) => {
                    tracing::warn!(flag = err.flag_name(), error = %err, "flag failed to resolve");
                    failures.push(Arc::new(err));
                }
            }
        }

        if failures.is_empty() {
            tracing::debug!(flags = self.definitions.len(), "flags resolved");
            Ok(builder.finish())
        } else {
            tracing::debug!(
                flags = self.definitions.len(),
                failed = failures.len(),
                "flag resolution failed"
            );
            Err(Arc::new(FlagError::combined(failures)))
        }
    }
}

impl<D: Into<FlagDefinition>> FromIterator<D> for FlagSet {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        Self {
            definitions: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<D: Into<FlagDefinition>> Extend<D> for FlagSet {
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        self.definitions.extend(iter.into_iter().map(Into::into));
    }
}
