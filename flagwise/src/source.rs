//! Ranked lookup of a flag's raw value.
//!
//! Sources are probed in a fixed order: the primary argument key, the alias
//! key, then each declared environment variable. The first match wins and
//! later sources are never consulted. Defaults are not a source here; the
//! resolver applies them once every source has come up empty.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use crate::{FlagDefinition, RawSourceMap};

/// Read access to environment variables by exact name.
pub trait Environment {
    /// Value of `name`, or `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// The live process environment.
///
/// Variables holding non-Unicode data are treated as unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        let raw = std::env::var_os(name)?;
        match raw.into_string() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::debug!(var = name, "ignoring non-Unicode environment variable");
                None
            }
        }
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Where a resolved value came from.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SourceOrigin {
    /// The flag's primary argument key.
    Argument,
    /// The flag's alias argument key.
    Alias,
    /// The named environment variable.
    Environment(String),
    /// The declared default.
    Default,
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument => f.write_str("argument"),
            Self::Alias => f.write_str("alias"),
            Self::Environment(var) => write!(f, "environment variable {var}"),
            Self::Default => f.write_str("default"),
        }
    }
}

/// Raw text found for a flag together with its origin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceMatch {
    /// Unprocessed text.
    pub raw: String,
    /// Which source supplied it.
    pub origin: SourceOrigin,
}

/// Probe the argument map, then the environment, for `definition`.
///
/// Returns `None` when nothing matches; that is not an error.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use flagwise::{Flag, FlagDefinition, RawSourceMap, SourceOrigin, read_source};
///
/// let def: FlagDefinition = Flag::string("foo").alias("f").env("FOO").into();
/// let args = RawSourceMap::from_pairs([("f", "from-alias")]);
/// let env = HashMap::from([(String::from("FOO"), String::from("from-env"))]);
/// let found = read_source(&def, &args, &env).map(|m| (m.raw, m.origin));
/// assert_eq!(found, Some((String::from("from-alias"), SourceOrigin::Alias)));
/// ```
pub fn read_source<E>(
    definition: &FlagDefinition,
    args: &RawSourceMap,
    env: &E,
) -> Option<SourceMatch>
where
    E: Environment + ?Sized,
{
    if let Some(raw) = args.get(definition.name()) {
        return Some(SourceMatch {
            raw: raw.to_owned(),
            origin: SourceOrigin::Argument,
        });
    }
    if let Some(raw) = definition.alias().and_then(|alias| args.get(alias)) {
        return Some(SourceMatch {
            raw: raw.to_owned(),
            origin: SourceOrigin::Alias,
        });
    }
    read_env(definition, env)
}

/// Probe only the declared environment variables; the first one set wins.
pub(crate) fn read_env<E>(definition: &FlagDefinition, env: &E) -> Option<SourceMatch>
where
    E: Environment + ?Sized,
{
    definition.envars().iter().find_map(|var| {
        env.var(var).map(|raw| SourceMatch {
            raw,
            origin: SourceOrigin::Environment(var.clone()),
        })
    })
}
