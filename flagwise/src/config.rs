//! The aggregated, immutable configuration handed back to callers.
//!
//! A [`Configuration`] is an ordered list of named, typed slots. It is only
//! produced once every flag has resolved, through [`ConfigurationBuilder`],
//! and never changes afterwards.

use figment::{Figment, providers::Serialized};
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::resolve::ResolvedFlag;
use crate::source::SourceOrigin;
use crate::{FlagType, FlagValue, FlagwiseResult, IntoFlagwise};

#[derive(Clone, Debug, PartialEq)]
struct Slot {
    name: String,
    value: FlagValue,
    origin: SourceOrigin,
}

/// Fully resolved flag values keyed by flag name.
///
/// Serialises as a map from name to the natural JSON scalar.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Configuration {
    slots: Vec<Slot>,
}

impl Configuration {
    /// Start accumulating resolved flags.
    #[must_use]
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    /// Value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.slot(name).map(|slot| &slot.value)
    }

    /// Value of `name` as `T`, when present and of the matching kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagwise::{Configuration, FlagValue, ResolvedFlag, SourceOrigin};
    ///
    /// let config = Configuration::builder()
    ///     .push(ResolvedFlag {
    ///         key: "verbose".into(),
    ///         value: FlagValue::Boolean(true),
    ///         origin: SourceOrigin::Argument,
    ///     })
    ///     .finish();
    /// assert_eq!(config.get_as::<bool>("verbose"), Some(true));
    /// assert_eq!(config.get_as::<String>("verbose"), None);
    /// ```
    #[must_use]
    pub fn get_as<T: FlagType>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(T::from_value)
    }

    /// Text of string flag `name`.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FlagValue::as_str)
    }

    /// Value of boolean flag `name`.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FlagValue::as_bool)
    }

    /// Value of numeric flag `name`.
    #[must_use]
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FlagValue::as_number)
    }

    /// Where the value of `name` came from.
    #[must_use]
    pub fn origin(&self, name: &str) -> Option<&SourceOrigin> {
        self.slot(name).map(|slot| &slot.origin)
    }

    /// Names and values in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.slots
            .iter()
            .map(|slot| (slot.name.as_str(), &slot.value))
    }

    /// Number of flags.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when no flags were defined.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Render as a JSON object.
    ///
    /// Uses the same encoding as [`Serialize`], so integral numbers render
    /// as JSON integers.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Deserialise into a caller-defined record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FlagError::Gathering`] when the values do not fit `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagwise::{Configuration, FlagValue, ResolvedFlag, SourceOrigin};
    ///
    /// #[derive(serde::Deserialize)]
    /// struct Greeting { recipient: String }
    ///
    /// let config = Configuration::builder()
    ///     .push(ResolvedFlag {
    ///         key: "recipient".into(),
    ///         value: FlagValue::String("World".into()),
    ///         origin: SourceOrigin::Default,
    ///     })
    ///     .finish();
    /// let greeting: Greeting = config.extract()?;
    /// assert_eq!(greeting.recipient, "World");
    /// # Ok::<(), std::sync::Arc<flagwise::FlagError>>(())
    /// ```
    pub fn extract<T: DeserializeOwned>(&self) -> FlagwiseResult<T> {
        Figment::from(Serialized::defaults(self))
            .extract()
            .into_flagwise()
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for slot in &self.slots {
            map.serialize_entry(&slot.name, &slot.value)?;
        }
        map.end()
    }
}

/// Accumulates resolved flags before finalising a [`Configuration`].
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    slots: Vec<Slot>,
}

impl ConfigurationBuilder {
    /// Add a resolved flag. A repeated key replaces the earlier slot in place.
    #[must_use]
    pub fn push(mut self, resolved: ResolvedFlag) -> Self {
        self.insert(resolved);
        self
    }

    /// Add a resolved flag through a mutable reference.
    pub fn insert(&mut self, resolved: ResolvedFlag) {
        let ResolvedFlag { key, value, origin } = resolved;
        match self.slots.iter_mut().find(|slot| slot.name == key) {
            Some(slot) => {
                slot.value = value;
                slot.origin = origin;
            }
            None => self.slots.push(Slot {
                name: key,
                value,
                origin,
            }),
        }
    }

    /// Freeze the accumulated slots.
    #[must_use]
    pub fn finish(self) -> Configuration {
        Configuration { slots: self.slots }
    }
}

impl Extend<ResolvedFlag> for ConfigurationBuilder {
    fn extend<I: IntoIterator<Item = ResolvedFlag>>(&mut self, iter: I) {
        for resolved in iter {
            self.insert(resolved);
        }
    }
}

impl FromIterator<ResolvedFlag> for Configuration {
    fn from_iter<I: IntoIterator<Item = ResolvedFlag>>(iter: I) -> Self {
        let mut builder = Self::builder();
        builder.extend(iter);
        builder.finish()
    }
}
