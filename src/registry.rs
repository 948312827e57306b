//! Process-wide catalog of bundles.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry as MapEntry;
use std::sync::LazyLock;

use crate::builtin;
use crate::bundle::{
    AnyBundle,
    DisplayNameBundle,
    TimeZoneBundle,
};
use crate::config::ConfigManager;
use crate::error::DataError;
use crate::indexer::DirectoryImporter;
use crate::locale::{
    BundleId,
    Category,
    LocaleId,
};

/// Embedded bundles, parsed once on first access.
static BUILTIN: LazyLock<Result<Registry, DataError>> =
    LazyLock::new(|| Registry::from_bundles(builtin::parse_all()?));

/// An immutable set of bundles keyed by [`BundleId`].
///
/// Lookups never fall back to another locale: a missing bundle is `None`, a
/// missing key is [`crate::LookupError::KeyNotFound`].
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Bundles ordered by category, then locale
    bundles: BTreeMap<BundleId, AnyBundle>,
}

impl Registry {
    /// The bundles compiled into the crate.
    ///
    /// # Errors
    /// Only if the embedded data is malformed.
    pub fn builtin() -> Result<&'static Self, &'static DataError> {
        BUILTIN.as_ref()
    }

    /// Builds a registry from bundles.
    ///
    /// # Errors
    /// `DataError::DuplicateBundle` if two bundles share an id.
    pub fn from_bundles(bundles: impl IntoIterator<Item = AnyBundle>) -> Result<Self, DataError> {
        let mut registry = Self::default();
        for bundle in bundles {
            match registry.bundles.entry(bundle.id().clone()) {
                MapEntry::Occupied(entry) => {
                    return Err(DataError::DuplicateBundle(entry.key().clone()));
                }
                MapEntry::Vacant(entry) => {
                    entry.insert(bundle);
                }
            }
        }
        Ok(registry)
    }

    /// Replaces or adds bundles.
    ///
    /// # Errors
    /// `DataError::DuplicateBundle` if `bundles` itself contains an id twice.
    pub fn with_overrides(
        mut self,
        bundles: impl IntoIterator<Item = AnyBundle>,
    ) -> Result<Self, DataError> {
        let overrides = Self::from_bundles(bundles)?;
        for (id, bundle) in overrides.bundles {
            if self.bundles.insert(id.clone(), bundle).is_some() {
                tracing::debug!(bundle = %id, "Replaced bundle");
            }
        }
        Ok(self)
    }

    /// Builds the registry described by the current settings: the embedded
    /// bundles (unless `includeBuiltin` is false), then the files of
    /// `dataDirectory`.
    ///
    /// The embedded bundles are cloned from [`Registry::builtin`], not parsed
    /// again.
    ///
    /// # Errors
    /// Invalid patterns, unreadable or malformed bundle files, and duplicate
    /// bundle ids within the data directory.
    pub fn load(config: &ConfigManager) -> Result<Self, DataError> {
        let settings = config.get_settings();

        let registry = if settings.include_builtin {
            Self::builtin().map_err(DataError::Builtin)?.clone()
        } else {
            Self::default()
        };

        let Some(data_directory) = config.data_directory() else {
            tracing::debug!(bundles = registry.len(), "Registry loaded");
            return Ok(registry);
        };

        let imported = DirectoryImporter::new(data_directory.to_path_buf(), settings)?.import()?;
        let registry = registry.with_overrides(imported)?;
        tracing::debug!(bundles = registry.len(), "Registry loaded");
        Ok(registry)
    }

    #[must_use]
    pub fn get(&self, id: &BundleId) -> Option<&AnyBundle> {
        self.bundles.get(id)
    }

    /// A currency or locale names bundle.
    #[must_use]
    pub fn display_names(&self, id: &BundleId) -> Option<&DisplayNameBundle> {
        self.get(id).and_then(AnyBundle::as_display_names)
    }

    /// A time-zone names bundle.
    #[must_use]
    pub fn time_zones(&self, id: &BundleId) -> Option<&TimeZoneBundle> {
        self.get(id).and_then(AnyBundle::as_time_zones)
    }

    pub fn ids(&self) -> impl Iterator<Item = &BundleId> {
        self.bundles.keys()
    }

    pub fn bundles(&self) -> impl Iterator<Item = &AnyBundle> {
        self.bundles.values()
    }

    /// Locales that have a bundle of `category`.
    pub fn locales(&self, category: Category) -> impl Iterator<Item = &LocaleId> {
        self.bundles.keys().filter(move |id| id.category == category).map(|id| &id.locale)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
