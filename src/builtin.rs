//! CLDR tables compiled into the crate.
//!
//! The JSON sources under `data/` are embedded at build time and parsed on
//! first use.

use crate::bundle::AnyBundle;
use crate::error::DataError;
use crate::input::parse_any_bundle;
use crate::locale::BundleId;

/// Bundle id and JSON text of every embedded bundle.
const BUILTIN_BUNDLES: [(&str, &str); 4] = [
    ("CurrencyNames_lag", include_str!("../data/CurrencyNames_lag.json")),
    ("LocaleNames_xog", include_str!("../data/LocaleNames_xog.json")),
    ("TimeZoneNames_en_NZ", include_str!("../data/TimeZoneNames_en_NZ.json")),
    ("TimeZoneNames_wae", include_str!("../data/TimeZoneNames_wae.json")),
];

/// Ids and raw JSON of the embedded bundles.
pub fn sources() -> impl Iterator<Item = (&'static str, &'static str)> {
    BUILTIN_BUNDLES.into_iter()
}

/// Parses every embedded bundle.
///
/// # Errors
/// Only if the embedded data itself is malformed.
pub(crate) fn parse_all() -> Result<Vec<AnyBundle>, DataError> {
    sources()
        .map(|(id, text)| {
            let id = BundleId::parse(id)?;
            parse_any_bundle(id, text)
        })
        .collect()
}
