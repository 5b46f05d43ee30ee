//! Per-flag resolution: source lookup, default fallback, coercion, validation.

use crate::source::{Environment, SourceMatch, SourceOrigin, read_source};
use crate::{FlagDefinition, FlagError, FlagValue, RawSourceMap, Validity};

/// The outcome of resolving one definition successfully.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedFlag {
    /// The flag's name.
    pub key: String,
    /// The typed value.
    pub value: FlagValue,
    /// Where the value came from.
    pub origin: SourceOrigin,
}

/// Resolve one flag against `args` and `env`.
///
/// A sourced value is coerced to the declared kind and then, when a
/// validator is present, validated. When no source matches the declared
/// default is returned as-is, skipping both steps. The function holds no
/// state between calls, so flags may be resolved in any order or
/// concurrently.
///
/// # Errors
///
/// * [`FlagError::MissingValue`] when no source matches and there is no default.
/// * [`FlagError::CoercionFailed`] when the raw text does not fit the kind.
/// * [`FlagError::ValidationFailed`] when the validator rejects the value.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use futures::executor::block_on;
/// use flagwise::{Flag, FlagDefinition, FlagValue, RawSourceMap, resolve};
///
/// let def: FlagDefinition = Flag::boolean("verbose").env("VERBOSE").into();
/// let env = HashMap::from([(String::from("VERBOSE"), String::from("1"))]);
/// let resolved = block_on(resolve(&def, &RawSourceMap::default(), &env))?;
/// assert_eq!(resolved.value, FlagValue::Boolean(true));
/// # Ok::<(), flagwise::FlagError>(())
/// ```
pub async fn resolve<E>(
    definition: &FlagDefinition,
    args: &RawSourceMap,
    env: &E,
) -> Result<ResolvedFlag, FlagError>
where
    E: Environment + ?Sized,
{
    let Some(SourceMatch { raw, origin }) = read_source(definition, args, env) else {
        return fallback(definition);
    };
    tracing::debug!(flag = definition.name(), source = %origin, "flag value sourced");
    let value = coerce(definition, raw)?;
    validate(definition, &value).await?;
    Ok(ResolvedFlag {
        key: definition.name().to_owned(),
        value,
        origin,
    })
}

fn fallback(definition: &FlagDefinition) -> Result<ResolvedFlag, FlagError> {
    let Some(default) = definition.default_value() else {
        tracing::debug!(flag = definition.name(), "no source and no default");
        return Err(FlagError::missing(definition.name()));
    };
    tracing::debug!(flag = definition.name(), "falling back to default");
    Ok(ResolvedFlag {
        key: definition.name().to_owned(),
        value: default.clone(),
        origin: SourceOrigin::Default,
    })
}

pub(crate) fn coerce(definition: &FlagDefinition, raw: String) -> Result<FlagValue, FlagError> {
    let kind = definition.kind();
    kind.coerce(&raw).ok_or_else(|| FlagError::CoercionFailed {
        name: definition.name().to_owned(),
        kind,
        value: raw,
    })
}

async fn validate(definition: &FlagDefinition, value: &FlagValue) -> Result<(), FlagError> {
    let Some(validator) = definition.validator() else {
        return Ok(());
    };
    match validator.check(value.clone()).await {
        Validity::Valid => Ok(()),
        Validity::Invalid(message) => Err(FlagError::validation(definition.name(), message)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::executor::block_on;
    use rstest::rstest;

    use super::*;
    use crate::{Flag, FlagKind};

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    fn run(def: &FlagDefinition, args: &RawSourceMap) -> Result<ResolvedFlag, FlagError> {
        block_on(resolve(def, args, &no_env()))
    }

    #[test]
    fn default_used_when_nothing_matches() {
        let def: FlagDefinition = Flag::string("foo").env("FOO").default_value("fffff").into();
        let resolved = run(&def, &RawSourceMap::default())
            .unwrap_or_else(|err| panic!("default should apply: {err}"));
        assert_eq!(resolved.key, "foo");
        assert_eq!(resolved.value, FlagValue::String(String::from("fffff")));
        assert_eq!(resolved.origin, SourceOrigin::Default);
    }

    #[test]
    fn missing_without_default() {
        let def: FlagDefinition = Flag::string("foo").into();
        let err = run(&def, &RawSourceMap::default()).expect_err("no value should fail");
        assert!(matches!(&err, FlagError::MissingValue { name } if name == "foo"));
        assert_eq!(err.to_string(), "Could not assign foo");
    }

    #[test]
    fn defaults_skip_validation_and_coercion() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let def: FlagDefinition = Flag::number("port")
            .default_value(-1)
            .validator(move |_: f64| {
                seen.fetch_add(1, Ordering::SeqCst);
                async { Validity::invalid("never acceptable") }
            })
            .into();
        let resolved = run(&def, &RawSourceMap::default())
            .unwrap_or_else(|err| panic!("default bypasses validator: {err}"));
        assert_eq!(resolved.value, FlagValue::Number(-1.0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn sourced_value_is_validated() {
        let def: FlagDefinition = Flag::string("bar")
            .validator(|_: String| async { Validity::invalid("aaa") })
            .into();
        let err = run(&def, &RawSourceMap::from_pairs([("bar", "y")]))
            .expect_err("validator rejects");
        assert!(matches!(
            &err,
            FlagError::ValidationFailed { name, message } if name == "bar" && message == "aaa"
        ));
    }

    #[test]
    fn validator_receives_coerced_value() {
        let def: FlagDefinition = Flag::number("workers")
            .validator(|n: f64| async move {
                if n >= 1.0 { Validity::Valid } else { Validity::invalid("need a worker") }
            })
            .into();
        let ok = run(&def, &RawSourceMap::from_pairs([("workers", "4")]));
        assert_eq!(ok.map(|r| r.value).ok(), Some(FlagValue::Number(4.0)));
        let err = run(&def, &RawSourceMap::from_pairs([("workers", "0")]))
            .expect_err("zero workers rejected");
        assert_eq!(err.to_string(), "need a worker");
    }

    #[rstest]
    #[case(FlagKind::Boolean, "maybe")]
    #[case(FlagKind::Number, "ten")]
    fn coercion_failure_names_flag(#[case] kind: FlagKind, #[case] raw: &str) {
        let def = FlagDefinition::new("value", kind);
        let err = run(&def, &RawSourceMap::from_pairs([("value", raw)]))
            .expect_err("coercion should fail");
        match err {
            FlagError::CoercionFailed {
                name,
                kind: reported,
                value,
            } => {
                assert_eq!(name, "value");
                assert_eq!(reported, kind);
                assert_eq!(value, raw);
            }
            other => panic!("expected CoercionFailed, got {other:?}"),
        }
    }

    #[test]
    fn validator_not_run_after_coercion_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let def: FlagDefinition = Flag::boolean("debug")
            .validator(move |_: bool| {
                seen.fetch_add(1, Ordering::SeqCst);
                async { Validity::Valid }
            })
            .into();
        let outcome = run(&def, &RawSourceMap::from_pairs([("debug", "yes")]));
        assert!(outcome.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn environment_value_is_coerced() {
        let def: FlagDefinition = Flag::number("port").envars(["PORT", "APP_PORT"]).into();
        let env = HashMap::from([
            (String::from("PORT"), String::from("8080")),
            (String::from("APP_PORT"), String::from("9090")),
        ]);
        let resolved = block_on(resolve(&def, &RawSourceMap::default(), &env))
            .unwrap_or_else(|err| panic!("env should resolve: {err}"));
        assert_eq!(resolved.value, FlagValue::Number(8080.0));
        assert_eq!(
            resolved.origin,
            SourceOrigin::Environment(String::from("PORT"))
        );
    }
}
