//! The flat argument map and the clap-backed tokenizer that produces it.
//!
//! Flag resolution only ever reads a key→text mapping. Splitting a raw
//! argument vector into that mapping is delegated to `clap`: a throwaway
//! [`clap::Command`] is generated from the flag definitions and its matches
//! are flattened back into a [`RawSourceMap`].

use std::collections::BTreeMap;
use std::ffi::OsString;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::{FlagDefinition, FlagError, FlagKind, FlagwiseResult, IntoFlagwise};

/// Immutable mapping from argument key to raw textual value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawSourceMap(BTreeMap<String, String>);

impl RawSourceMap {
    /// Build a map from key/value pairs. Later duplicates replace earlier ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagwise::RawSourceMap;
    /// let args = RawSourceMap::from_pairs([("foo", "x"), ("bar", "y")]);
    /// assert_eq!(args.get("foo"), Some("x"));
    /// assert_eq!(args.len(), 2);
    /// ```
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Tokenise `argv` (without the program name) against `definitions`.
    ///
    /// Each definition becomes a long option named after the flag. A
    /// one-character alias becomes a short option and a longer alias a long
    /// alias; either way the value is stored under the flag's name. Boolean
    /// flags may appear bare (`--verbose`), which records `"true"`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::DuplicateName`] when two definitions claim the
    /// same name or alias, and [`FlagError::CliParsing`] when clap rejects
    /// the arguments (including `--help`, see
    /// [`crate::is_display_request`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use flagwise::{Flag, FlagDefinition, RawSourceMap};
    ///
    /// let defs: Vec<FlagDefinition> = vec![
    ///     Flag::string("foo").alias("f").into(),
    ///     Flag::boolean("verbose").into(),
    /// ];
    /// let args = RawSourceMap::parse_from(&defs, ["-f", "x", "--verbose"])?;
    /// assert_eq!(args.get("foo"), Some("x"));
    /// assert_eq!(args.get("verbose"), Some("true"));
    /// # Ok::<(), std::sync::Arc<flagwise::FlagError>>(())
    /// ```
    pub fn parse_from<I, T>(definitions: &[FlagDefinition], argv: I) -> FlagwiseResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ensure_unique_keys(definitions).into_flagwise()?;
        let matches = build_command(definitions)
            .try_get_matches_from(argv)
            .into_flagwise()?;
        Ok(Self::from_matches(definitions, &matches))
    }

    fn from_matches(definitions: &[FlagDefinition], matches: &ArgMatches) -> Self {
        Self(
            definitions
                .iter()
                .filter_map(|def| {
                    matches
                        .get_one::<String>(def.name())
                        .map(|value| (def.name().to_owned(), value.clone()))
                })
                .collect(),
        )
    }

    /// Raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no keys are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawSourceMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Reject definitions whose names or aliases would collide as clap keys.
fn ensure_unique_keys(definitions: &[FlagDefinition]) -> Result<(), FlagError> {
    let mut seen = std::collections::HashSet::new();
    let keys = definitions
        .iter()
        .flat_map(|def| std::iter::once(def.name()).chain(def.alias()));
    for key in keys {
        if !seen.insert(key) {
            return Err(FlagError::DuplicateName {
                name: key.to_owned(),
            });
        }
    }
    Ok(())
}

fn claims_help(definitions: &[FlagDefinition]) -> bool {
    definitions.iter().any(|def| {
        def.name() == "help" || matches!(def.alias(), Some("h" | "help"))
    })
}

fn build_command(definitions: &[FlagDefinition]) -> Command {
    let command = Command::new("flags")
        .no_binary_name(true)
        .disable_help_flag(claims_help(definitions));
    definitions
        .iter()
        .fold(command, |cmd, def| cmd.arg(build_arg(def)))
}

fn build_arg(def: &FlagDefinition) -> Arg {
    let mut arg = Arg::new(def.name().to_owned())
        .long(def.name().to_owned())
        .action(ArgAction::Set);
    match def.kind() {
        FlagKind::Boolean => arg = arg.num_args(0..=1).default_missing_value("true"),
        FlagKind::Number => arg = arg.allow_negative_numbers(true),
        FlagKind::String => {}
    }
    if let Some(alias) = def.alias() {
        let mut chars = alias.chars();
        arg = match (chars.next(), chars.next()) {
            (Some(short), None) => arg.short(short),
            _ => arg.alias(alias.to_owned()),
        };
    }
    if !def.envars().is_empty() {
        arg = arg.help(format!("[env: {}]", def.envars().join(", ")));
    }
    arg
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::Flag;

    fn definitions() -> Vec<FlagDefinition> {
        vec![
            Flag::string("foo").alias("f").into(),
            Flag::string("bar").alias("barbar").into(),
            Flag::boolean("verbose").alias("v").into(),
            Flag::number("port").into(),
        ]
    }

    #[rstest]
    #[case(&["--foo", "x"], "foo", "x")]
    #[case(&["--foo=x"], "foo", "x")]
    #[case(&["-f", "x"], "foo", "x")]
    #[case(&["--barbar", "y"], "bar", "y")]
    #[case(&["--verbose"], "verbose", "true")]
    #[case(&["-v"], "verbose", "true")]
    #[case(&["--verbose", "FALSE"], "verbose", "FALSE")]
    #[case(&["--port", "8080"], "port", "8080")]
    #[case(&["--port", "-1"], "port", "-1")]
    fn stores_values_under_flag_name(
        #[case] argv: &[&str],
        #[case] key: &str,
        #[case] expected: &str,
    ) {
        let args = RawSourceMap::parse_from(&definitions(), argv.iter().copied())
            .unwrap_or_else(|err| panic!("tokenising {argv:?} failed: {err}"));
        assert_eq!(args.get(key), Some(expected));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn absent_flags_are_absent() {
        let args = RawSourceMap::parse_from(&definitions(), Vec::<String>::new())
            .unwrap_or_else(|err| panic!("empty argv failed: {err}"));
        assert!(args.is_empty());
    }

    #[test]
    fn unknown_argument_is_cli_error() {
        let err = RawSourceMap::parse_from(&definitions(), ["--bogus"])
            .expect_err("unknown flag should fail");
        assert!(matches!(*err, FlagError::CliParsing(_)));
    }

    #[test]
    fn duplicate_alias_is_rejected_before_clap() {
        let defs: Vec<FlagDefinition> = vec![
            Flag::string("foo").alias("x").into(),
            Flag::string("bar").alias("x").into(),
        ];
        let err = RawSourceMap::parse_from(&defs, Vec::<String>::new())
            .expect_err("duplicate alias should fail");
        assert!(matches!(&*err, FlagError::DuplicateName { name } if name == "x"));
    }

    #[test]
    fn help_alias_disables_builtin_help() {
        let defs: Vec<FlagDefinition> = vec![Flag::string("host").alias("h").into()];
        let args = RawSourceMap::parse_from(&defs, ["-h", "localhost"])
            .unwrap_or_else(|err| panic!("-h should be the host alias: {err}"));
        assert_eq!(args.get("host"), Some("localhost"));
    }

    #[test]
    fn help_request_surfaces_as_display_request() {
        let err = RawSourceMap::parse_from(&definitions(), ["--help"])
            .expect_err("--help should short-circuit");
        assert!(crate::is_display_request(&err));
    }
}
