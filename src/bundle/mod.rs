//! Display-name bundles: one ordered table per (locale, category).

mod time_zone;

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{
    Serialize,
    Serializer,
};

use crate::error::{
    DataError,
    LookupError,
};
use crate::locale::BundleId;
use crate::types::SourcePosition;

pub use time_zone::TimeZoneNames;

/// A single key/value pair of a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// ISO code, locale subtag or IANA zone id.
    pub key: String,
    pub value: V,
}

impl<V> Entry<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self { key: key.into(), value }
    }
}

/// An immutable table of display names for one locale and category.
///
/// Entries keep the order in which they were authored. Keys are unique; the
/// index used by [`Bundle::lookup`] is built once, at construction.
#[derive(Debug, Clone)]
pub struct Bundle<V> {
    /// Bundle identity
    id: BundleId,
    /// Entries in authored order
    entries: Vec<Entry<V>>,
    /// Key -> position in `entries`
    index: HashMap<String, usize>,
}

/// Currency and locale display names.
pub type DisplayNameBundle = Bundle<String>;

/// Time-zone name sets.
pub type TimeZoneBundle = Bundle<TimeZoneNames>;

impl<V> Bundle<V> {
    /// Builds a bundle from entries.
    ///
    /// # Errors
    /// `DataError::DuplicateKey` when two entries share a key.
    pub fn new(id: BundleId, entries: Vec<Entry<V>>) -> Result<Self, DataError> {
        Self::with_positions(id, entries, &[])
    }

    /// Same as [`Bundle::new`], with the source position of each entry so that
    /// duplicate keys can be reported precisely.
    pub(crate) fn with_positions(
        id: BundleId,
        entries: Vec<Entry<V>>,
        positions: &[SourcePosition],
    ) -> Result<Self, DataError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if let Some(first) = index.insert(entry.key.clone(), i) {
                return Err(DataError::DuplicateKey {
                    bundle: id,
                    key: entry.key.clone(),
                    first: positions.get(first).copied(),
                    second: positions.get(i).copied(),
                });
            }
        }
        Ok(Self { id, entries, index })
    }

    #[must_use]
    pub const fn id(&self) -> &BundleId {
        &self.id
    }

    /// The literal table, in authored order.
    #[must_use]
    pub fn contents(&self) -> &[Entry<V>] {
        &self.entries
    }

    /// Looks up the value for `key`.
    ///
    /// Keys are matched exactly (`"eur"` and `"EUR"` are different keys).
    ///
    /// # Errors
    /// `LookupError::KeyNotFound` when this bundle has no entry for `key`.
    pub fn lookup(&self, key: &str) -> Result<&V, LookupError> {
        self.get(key).ok_or_else(|| LookupError::KeyNotFound {
            bundle: self.id.clone(),
            key: key.to_string(),
        })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).and_then(|&i| self.entries.get(i)).map(|entry| &entry.value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> Serialize for Bundle<V> {
    /// Serializes as a JSON object in entry order, the same shape bundle files use.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

/// A bundle whose value shape is only known at run time.
#[derive(Debug, Clone)]
pub enum AnyBundle {
    DisplayNames(DisplayNameBundle),
    TimeZones(TimeZoneBundle),
}

/// A borrowed value from an [`AnyBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BundleValue<'a> {
    Text(&'a str),
    TimeZone(&'a TimeZoneNames),
}

impl AnyBundle {
    #[must_use]
    pub const fn id(&self) -> &BundleId {
        match self {
            Self::DisplayNames(bundle) => bundle.id(),
            Self::TimeZones(bundle) => bundle.id(),
        }
    }

    /// # Errors
    /// `LookupError::KeyNotFound` when the key is absent.
    pub fn lookup(&self, key: &str) -> Result<BundleValue<'_>, LookupError> {
        match self {
            Self::DisplayNames(bundle) => bundle.lookup(key).map(|v| BundleValue::Text(v.as_str())),
            Self::TimeZones(bundle) => bundle.lookup(key).map(BundleValue::TimeZone),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::DisplayNames(bundle) => bundle.len(),
            Self::TimeZones(bundle) => bundle.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn as_display_names(&self) -> Option<&DisplayNameBundle> {
        match self {
            Self::DisplayNames(bundle) => Some(bundle),
            Self::TimeZones(_) => None,
        }
    }

    #[must_use]
    pub const fn as_time_zones(&self) -> Option<&TimeZoneBundle> {
        match self {
            Self::TimeZones(bundle) => Some(bundle),
            Self::DisplayNames(_) => None,
        }
    }
}

impl Serialize for AnyBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::DisplayNames(bundle) => bundle.serialize(serializer),
            Self::TimeZones(bundle) => bundle.serialize(serializer),
        }
    }
}

impl From<DisplayNameBundle> for AnyBundle {
    fn from(bundle: DisplayNameBundle) -> Self {
        Self::DisplayNames(bundle)
    }
}

impl From<TimeZoneBundle> for AnyBundle {
    fn from(bundle: TimeZoneBundle) -> Self {
        Self::TimeZones(bundle)
    }
}
