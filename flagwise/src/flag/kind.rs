//! Type tags, typed values, and textual coercion.

use std::fmt;

use serde::{Serialize, Serializer};

/// Semantic type a flag's textual value is coerced into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FlagKind {
    /// Text passed through unchanged.
    String,
    /// `1`/`true`/`TRUE` or `0`/`false`/`FALSE`.
    Boolean,
    /// A finite floating-point number.
    Number,
}

impl FlagKind {
    /// Coerce `raw` into a value of this kind.
    ///
    /// Returns `None` when the text has no meaning for the kind. Numbers are
    /// trimmed of surrounding whitespace before parsing; empty text and
    /// non-finite results (`NaN`, `inf`) are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagwise::{FlagKind, FlagValue};
    /// assert_eq!(FlagKind::Boolean.coerce("TRUE"), Some(FlagValue::Boolean(true)));
    /// assert_eq!(FlagKind::Boolean.coerce("yes"), None);
    /// assert_eq!(FlagKind::Number.coerce(" 8080 "), Some(FlagValue::Number(8080.0)));
    /// ```
    #[must_use]
    pub fn coerce(self, raw: &str) -> Option<FlagValue> {
        match self {
            Self::String => Some(FlagValue::String(raw.to_owned())),
            Self::Boolean => match raw {
                "1" | "true" | "TRUE" => Some(FlagValue::Boolean(true)),
                "0" | "false" | "FALSE" => Some(FlagValue::Boolean(false)),
                _ => None,
            },
            Self::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(FlagValue::Number)
            }
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
        })
    }
}

/// A resolved, typed flag value.
///
/// Serialises as the bare scalar. Integral numbers serialise as integers so
/// they deserialise into integer fields.
#[derive(Clone, Debug, PartialEq)]
pub enum FlagValue {
    /// Textual value.
    String(String),
    /// Boolean value.
    Boolean(bool),
    /// Numeric value.
    Number(f64),
}

impl FlagValue {
    /// The type tag of this value.
    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        match self {
            Self::String(_) => FlagKind::String,
            Self::Boolean(_) => FlagKind::Boolean,
            Self::Number(_) => FlagKind::Number,
        }
    }

    /// Borrow the text when this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Boolean(_) | Self::Number(_) => None,
        }
    }

    /// The boolean when this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::String(_) | Self::Number(_) => None,
        }
    }

    /// The number when this is a numeric value.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(_) | Self::Boolean(_) => None,
        }
    }
}

impl Serialize for FlagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
        }
    }
}

/// `n` as an `i64` when it has no fractional part and fits.
fn integral(n: f64) -> Option<i64> {
    if n.fract() != 0.0 {
        return None;
    }
    format!("{n}").parse().ok()
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Rust types that can back a flag.
///
/// Implemented for [`String`], [`bool`], and [`f64`]; each maps to one
/// [`FlagKind`].
pub trait FlagType: Clone + Send + Sync + 'static {
    /// The type tag flags of this type carry.
    const KIND: FlagKind;

    /// Wrap `self` as a [`FlagValue`].
    fn into_value(self) -> FlagValue;

    /// Extract `Self` from `value` when the kinds agree.
    fn from_value(value: &FlagValue) -> Option<Self>;
}

impl FlagType for String {
    const KIND: FlagKind = FlagKind::String;

    fn into_value(self) -> FlagValue {
        FlagValue::String(self)
    }

    fn from_value(value: &FlagValue) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FlagType for bool {
    const KIND: FlagKind = FlagKind::Boolean;

    fn into_value(self) -> FlagValue {
        FlagValue::Boolean(self)
    }

    fn from_value(value: &FlagValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FlagType for f64 {
    const KIND: FlagKind = FlagKind::Number;

    fn into_value(self) -> FlagValue {
        FlagValue::Number(self)
    }

    fn from_value(value: &FlagValue) -> Option<Self> {
        value.as_number()
    }
}
