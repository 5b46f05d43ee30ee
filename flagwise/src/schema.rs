//! Hand flag candidates to a schema engine instead of coercing them here.
//!
//! In this mode the crate only picks the best candidate per flag (argument,
//! alias, environment variable, or default) and lets figment and serde own
//! type checking and error formatting. Validators are not run.

use figment::{
    Figment, Metadata, Profile, Provider,
    error::Error,
    value::{Dict, Map, Value},
};
use serde::de::DeserializeOwned;

use crate::source::{Environment, ProcessEnv, read_env};
use crate::{FlagDefinition, FlagKind, FlagSet, FlagValue, FlagwiseResult, IntoFlagwise, RawSourceMap};

impl FlagDefinition {
    /// Best candidate for a schema engine given the argument-side `raw` value.
    ///
    /// Returns `raw` when present, otherwise the first set environment
    /// variable, otherwise the default, otherwise `None`. Text for boolean
    /// and number flags is lifted with figment's scalar parsing, so `"8080"`
    /// becomes a number and `"true"` a boolean. String flags keep their text
    /// verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use figment::value::Value;
    /// use flagwise::{Flag, FlagDefinition};
    ///
    /// let def: FlagDefinition = Flag::string("foo").env("FOO").default_value("fffff").into();
    /// let env = HashMap::<String, String>::new();
    /// assert_eq!(def.preprocess(Some("x"), &env), Some(Value::from("x")));
    /// assert_eq!(def.preprocess(None, &env), Some(Value::from("fffff")));
    /// ```
    #[must_use]
    pub fn preprocess<E>(&self, raw: Option<&str>, env: &E) -> Option<Value>
    where
        E: Environment + ?Sized,
    {
        if let Some(text) = raw {
            return Some(self.candidate(text));
        }
        if let Some(found) = read_env(self, env) {
            return Some(self.candidate(&found.raw));
        }
        self.default_value().map(default_candidate)
    }

    fn candidate(&self, text: &str) -> Value {
        match self.kind() {
            FlagKind::String => Value::from(text.to_owned()),
            FlagKind::Boolean | FlagKind::Number => lift(text),
        }
    }

    fn argument<'a>(&self, args: &'a RawSourceMap) -> Option<&'a str> {
        args.get(self.name())
            .or_else(|| self.alias().and_then(|alias| args.get(alias)))
    }
}

fn lift(text: &str) -> Value {
    text.parse()
        .unwrap_or_else(|_| Value::from(text.to_owned()))
}

fn default_candidate(value: &FlagValue) -> Value {
    match value {
        FlagValue::String(s) => Value::from(s.clone()),
        FlagValue::Boolean(b) => Value::from(*b),
        FlagValue::Number(n) => lift(&n.to_string()),
    }
}

/// Figment provider exposing one candidate per flag.
///
/// Flags without a candidate are omitted, so the schema decides whether a
/// missing key is an error.
#[derive(Clone, Debug)]
pub struct CandidateProvider {
    candidates: Dict,
}

impl CandidateProvider {
    /// Collect candidates for every flag in `flags`.
    #[must_use]
    pub fn new<E>(flags: &FlagSet, args: &RawSourceMap, env: &E) -> Self
    where
        E: Environment + ?Sized,
    {
        let candidates = flags
            .definitions()
            .iter()
            .filter_map(|def| {
                def.preprocess(def.argument(args), env)
                    .map(|value| (def.name().to_owned(), value))
            })
            .collect();
        Self { candidates }
    }
}

impl Provider for CandidateProvider {
    fn metadata(&self) -> Metadata {
        Metadata::named("flag candidates")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        Ok(Profile::Default.collect(self.candidates.clone()))
    }
}

impl FlagSet {
    /// Deserialise `T` from flag candidates resolved against `args` and the
    /// process environment.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::extract_with_env`].
    pub fn extract<T: DeserializeOwned>(&self, args: &RawSourceMap) -> FlagwiseResult<T> {
        self.extract_with_env(args, &ProcessEnv)
    }

    /// Deserialise `T` from flag candidates resolved against `args` and `env`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlagError::DuplicateName`] for repeated names and
    /// [`crate::FlagError::Gathering`] when the candidates do not satisfy `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use flagwise::{Flag, FlagSet, RawSourceMap};
    ///
    /// #[derive(serde::Deserialize)]
    /// struct Server { port: u16, debug: bool }
    ///
    /// let flags = FlagSet::new()
    ///     .with(Flag::number("port").env("PORT"))
    ///     .with(Flag::boolean("debug").default_value(false));
    /// let env = HashMap::from([(String::from("PORT"), String::from("8080"))]);
    /// let server: Server = flags.extract_with_env(&RawSourceMap::default(), &env)?;
    /// assert_eq!(server.port, 8080);
    /// assert!(!server.debug);
    /// # Ok::<(), std::sync::Arc<flagwise::FlagError>>(())
    /// ```
    pub fn extract_with_env<T, E>(&self, args: &RawSourceMap, env: &E) -> FlagwiseResult<T>
    where
        T: DeserializeOwned,
        E: Environment + ?Sized,
    {
        self.ensure_unique().into_flagwise()?;
        Figment::from(CandidateProvider::new(self, args, env))
            .extract()
            .into_flagwise()
    }
}
