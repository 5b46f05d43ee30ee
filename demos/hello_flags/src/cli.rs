//! Flag definitions and rendering for the demo.
//!
//! `foo` falls back to `"fffff"` when neither an argument nor `FOO` is
//! present. `bar` has no default and rejects blank values, so running the
//! binary without it reports a missing value.

use std::io::{self, Write};

use flagwise::{Configuration, Flag, FlagSet, Validity};

/// Flags understood by `hello_flags`.
#[must_use]
pub fn flags() -> FlagSet {
    FlagSet::new()
        .with(
            Flag::string("foo")
                .alias("f")
                .envars(["FOO", "HELLO_FOO"])
                .default_value("fffff"),
        )
        .with(
            Flag::string("bar")
                .alias("b")
                .env("BAR")
                .validator(|bar: String| async move {
                    if bar.trim().is_empty() {
                        Validity::invalid("bar must contain visible characters")
                    } else {
                        Validity::Valid
                    }
                }),
        )
        .with(
            Flag::boolean("loud")
                .alias("l")
                .env("HELLO_LOUD")
                .default_value(false),
        )
        .with(
            Flag::number("times")
                .alias("t")
                .env("HELLO_TIMES")
                .default_value(1)
                .validator(|times: f64| async move {
                    if times.fract().abs() < f64::EPSILON && (1.0..=5.0).contains(&times) {
                        Validity::Valid
                    } else {
                        Validity::invalid(format!(
                            "times must be a whole number from 1 to 5, got {times}"
                        ))
                    }
                }),
        )
}

/// Write `config` as a single JSON line.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing fails.
pub fn write_config_to(out: &mut impl Write, config: &Configuration) -> io::Result<()> {
    writeln!(out, "{}", config.to_json())
}

/// Print `config` to standard output.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing to standard output fails.
pub fn print_config(config: &Configuration) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_config_to(&mut stdout, config)
}
