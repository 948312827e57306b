//! cldr-display-names
//!
//! Locale-specific display names for currencies, languages, regions, scripts
//! and time zones, derived from the Unicode Common Locale Data Repository.
//!
//! ```
//! use cldr_display_names::{BundleId, Registry};
//!
//! let registry = Registry::builtin().unwrap();
//! let currencies = registry.display_names(&BundleId::parse("CurrencyNames_lag").unwrap()).unwrap();
//!
//! assert_eq!(currencies.lookup("eur").unwrap(), "Yáuro");
//! assert!(currencies.lookup("xyz").is_err());
//! ```

pub mod builtin;
pub mod bundle;
pub mod config;
pub mod error;
pub mod indexer;
pub mod input;
pub mod locale;
pub mod registry;
#[cfg(test)]
mod test_utils;
pub mod types;

pub use bundle::{
    AnyBundle,
    Bundle,
    BundleValue,
    DisplayNameBundle,
    Entry,
    TimeZoneBundle,
    TimeZoneNames,
};
pub use error::{
    DataError,
    LookupError,
};
pub use locale::{
    BundleId,
    Category,
    LocaleId,
};
pub use registry::Registry;
