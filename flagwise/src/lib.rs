//! Ranked flag resolution for command-line programs.
//!
//! A flag's value is taken from the first source that supplies one: its
//! argument key, its alias, then each of its environment variables in
//! declaration order. When nothing matches, the declared default is used
//! verbatim. Sourced text is coerced into the flag's type (string, boolean,
//! or number) and checked by an optional asynchronous validator.
//!
//! [`FlagSet`] resolves many flags concurrently and returns either a complete
//! [`Configuration`] or one [`FlagError::Aggregate`] naming every flag that
//! failed.
//!
//! ```
//! use std::collections::HashMap;
//! use futures::executor::block_on;
//! use flagwise::{Flag, FlagSet, RawSourceMap, Validity};
//!
//! let flags = FlagSet::new()
//!     .with(Flag::string("foo").alias("f").env("FOO"))
//!     .with(
//!         Flag::string("bar")
//!             .alias("b")
//!             .env("BAR")
//!             .validator(|_: String| async { Validity::invalid("aaa") }),
//!     );
//! let args = RawSourceMap::from_pairs([("foo", "x"), ("bar", "y")]);
//! let err = block_on(flags.compile_with_env(&args, &HashMap::<String, String>::new()))
//!     .expect_err("bar is always rejected");
//! assert_eq!(err.to_string(), "aaa");
//! ```

mod args;
mod config;
mod error;
mod flag;
mod flag_set;
mod resolve;
mod result_ext;
mod schema;
mod source;

pub use args::RawSourceMap;
pub use config::{Configuration, ConfigurationBuilder};
pub use error::{AggregatedErrors, FlagError, is_display_request};
pub use flag::{Flag, FlagDefinition, FlagKind, FlagType, FlagValue, Validator, Validity};
pub use flag_set::FlagSet;
pub use resolve::{ResolvedFlag, resolve};
pub use result_ext::{FlagwiseResult, IntoFlagwise};
pub use schema::CandidateProvider;
pub use source::{Environment, ProcessEnv, SourceMatch, SourceOrigin, read_source};

pub use figment;
