//! Locale and bundle identifiers.
//!
//! A bundle is identified by its category and locale, rendered the same way the
//! bundle files are named: `CurrencyNames_lag`, `TimeZoneNames_en_NZ`.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use thiserror::Error;

/// Errors raised while parsing identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid locale identifier '{0}'")]
    InvalidLocale(String),

    #[error("Unknown bundle category '{0}' (expected CurrencyNames, LocaleNames or TimeZoneNames)")]
    UnknownCategory(String),

    #[error("Invalid bundle identifier '{0}' (expected <Category>_<locale>, e.g. CurrencyNames_lag)")]
    InvalidBundleId(String),
}

/// Shape of the values stored in a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    /// A single display string.
    Text,
    /// Six time-zone name variants.
    TimeZone,
}

/// The kind of display names a bundle holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Category {
    /// ISO 4217 currency names and symbols.
    CurrencyNames,
    /// Language, region, script and key/type display names.
    LocaleNames,
    /// Time-zone name sets keyed by IANA zone id.
    TimeZoneNames,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::CurrencyNames, Self::LocaleNames, Self::TimeZoneNames];

    /// Prefix used in bundle ids and file names.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::CurrencyNames => "CurrencyNames",
            Self::LocaleNames => "LocaleNames",
            Self::TimeZoneNames => "TimeZoneNames",
        }
    }

    #[must_use]
    pub const fn shape(self) -> ValueShape {
        match self {
            Self::CurrencyNames | Self::LocaleNames => ValueShape::Text,
            Self::TimeZoneNames => ValueShape::TimeZone,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Category {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.prefix() == s)
            .ok_or_else(|| IdError::UnknownCategory(s.to_string()))
    }
}

/// A canonical locale identifier such as `lag`, `en_NZ` or `sr_Latn_BA`.
///
/// Subtags are joined with `_`. Parsing accepts `-` as well and normalizes
/// casing: language lowercase, script titlecase, region uppercase, variants
/// lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleId(String);

impl LocaleId {
    /// Parses and canonicalizes a locale identifier.
    ///
    /// # Examples
    /// ```
    /// use cldr_display_names::locale::LocaleId;
    ///
    /// assert_eq!(LocaleId::parse("en-nz").unwrap().as_str(), "en_NZ");
    /// assert_eq!(LocaleId::parse("SR_latn_ba").unwrap().as_str(), "sr_Latn_BA");
    /// assert!(LocaleId::parse("e").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, IdError> {
        let invalid = || IdError::InvalidLocale(input.to_string());

        let mut subtags = input.split(['_', '-']);
        let language = subtags.next().filter(|l| is_language(l)).ok_or_else(invalid)?;

        let mut canonical = language.to_ascii_lowercase();
        // Script and region are positional; anything after them is a variant.
        let mut stage = 0;
        for subtag in subtags {
            let normalized = if stage < 1 && is_script(subtag) {
                stage = 1;
                titlecase(subtag)
            } else if stage < 2 && is_region(subtag) {
                stage = 2;
                subtag.to_ascii_uppercase()
            } else if is_variant(subtag) {
                stage = 3;
                subtag.to_ascii_lowercase()
            } else {
                return Err(invalid());
            };
            canonical.push('_');
            canonical.push_str(&normalized);
        }

        Ok(Self(canonical))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }

    /// The locale in BCP 47 form (`en-NZ`).
    #[must_use]
    pub fn to_bcp47(&self) -> String {
        self.0.replace('_', "-")
    }
}

/// 2-3 letter ISO 639 code or a 5-8 letter registered language.
fn is_language(subtag: &str) -> bool {
    matches!(subtag.len(), 2..=3 | 5..=8) && subtag.chars().all(|c| c.is_ascii_alphabetic())
}

/// ISO 15924 script code.
fn is_script(subtag: &str) -> bool {
    subtag.len() == 4 && subtag.chars().all(|c| c.is_ascii_alphabetic())
}

/// ISO 3166 alpha-2 code or UN M.49 numeric area.
fn is_region(subtag: &str) -> bool {
    (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
        || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()))
}

/// Variant subtag: 5-8 alphanumerics, or 4 starting with a digit.
fn is_variant(subtag: &str) -> bool {
    let alnum = subtag.chars().all(|c| c.is_ascii_alphanumeric());
    match subtag.len() {
        5..=8 => alnum,
        4 => alnum && subtag.starts_with(|c: char| c.is_ascii_digit()),
        _ => false,
    }
}

/// `latn` -> `Latn`
fn titlecase(subtag: &str) -> String {
    let lower = subtag.to_ascii_lowercase();
    let mut chars = lower.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identifies one bundle: a category for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BundleId {
    pub category: Category,
    pub locale: LocaleId,
}

impl BundleId {
    #[must_use]
    pub const fn new(category: Category, locale: LocaleId) -> Self {
        Self { category, locale }
    }

    /// Parses `<Category>_<locale>`.
    ///
    /// # Examples
    /// ```
    /// use cldr_display_names::locale::{BundleId, Category};
    ///
    /// let id = BundleId::parse("TimeZoneNames_en_NZ").unwrap();
    /// assert_eq!(id.category, Category::TimeZoneNames);
    /// assert_eq!(id.locale.as_str(), "en_NZ");
    /// ```
    pub fn parse(input: &str) -> Result<Self, IdError> {
        let (prefix, locale) =
            input.split_once('_').ok_or_else(|| IdError::InvalidBundleId(input.to_string()))?;
        let category = prefix.parse::<Category>()?;
        let locale = LocaleId::parse(locale)?;
        Ok(Self { category, locale })
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category, self.locale)
    }
}

impl FromStr for BundleId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for BundleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BundleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::language_only("lag", "lag")]
    #[case::upper_language("XOG", "xog")]
    #[case::region("en_NZ", "en_NZ")]
    #[case::hyphen_region("en-nz", "en_NZ")]
    #[case::script_region("sr_latn_ba", "sr_Latn_BA")]
    #[case::numeric_region("es_419", "es_419")]
    #[case::variant("ca_ES_valencia", "ca_ES_valencia")]
    #[case::long_language("filipino", "filipino")]
    fn test_parse_locale(#[case] input: &str, #[case] expected: &str) {
        assert_that!(LocaleId::parse(input).map(|l| l.to_string()), ok(eq(expected)));
    }

    #[rstest]
    #[case::empty("")]
    #[case::single_letter("e")]
    #[case::four_letter_language("engl")]
    #[case::digit_language("e1")]
    #[case::empty_subtag("en__NZ")]
    #[case::region_before_script("en_NZ_Latn")]
    #[case::bad_region("en_N")]
    fn test_parse_locale_rejects(#[case] input: &str) {
        assert_that!(LocaleId::parse(input), err(eq(&IdError::InvalidLocale(input.to_string()))));
    }

    #[googletest::test]
    fn test_locale_accessors() {
        let locale = LocaleId::parse("en_NZ").unwrap();

        expect_that!(locale.language(), eq("en"));
        expect_that!(locale.to_bcp47(), eq("en-NZ"));
    }

    #[rstest]
    #[case("CurrencyNames", Category::CurrencyNames)]
    #[case("LocaleNames", Category::LocaleNames)]
    #[case("TimeZoneNames", Category::TimeZoneNames)]
    fn test_category_round_trips_through_prefix(#[case] prefix: &str, #[case] category: Category) {
        assert_that!(prefix.parse::<Category>(), ok(eq(&category)));
        assert_that!(category.to_string(), eq(prefix));
    }

    #[googletest::test]
    fn test_category_shape() {
        expect_that!(Category::CurrencyNames.shape(), eq(ValueShape::Text));
        expect_that!(Category::LocaleNames.shape(), eq(ValueShape::Text));
        expect_that!(Category::TimeZoneNames.shape(), eq(ValueShape::TimeZone));
    }

    #[rstest]
    #[case("CurrencyNames_lag", Category::CurrencyNames, "lag")]
    #[case("LocaleNames_xog", Category::LocaleNames, "xog")]
    #[case("TimeZoneNames_en_NZ", Category::TimeZoneNames, "en_NZ")]
    fn test_parse_bundle_id(#[case] input: &str, #[case] category: Category, #[case] locale: &str) {
        let id = BundleId::parse(input).unwrap();

        assert_that!(id.category, eq(category));
        assert_that!(id.locale.as_str(), eq(locale));
        assert_that!(id.to_string(), eq(input));
    }

    #[rstest]
    #[case::no_separator("CurrencyNames", IdError::InvalidBundleId("CurrencyNames".to_string()))]
    #[case::unknown_category("Names_lag", IdError::UnknownCategory("Names".to_string()))]
    #[case::bad_locale("LocaleNames_x", IdError::InvalidLocale("x".to_string()))]
    fn test_parse_bundle_id_rejects(#[case] input: &str, #[case] expected: IdError) {
        assert_that!(BundleId::parse(input), err(eq(&expected)));
    }

    #[rstest]
    fn test_bundle_ids_order_by_category_then_locale() {
        let mut ids: Vec<BundleId> = ["TimeZoneNames_wae", "CurrencyNames_lag", "TimeZoneNames_en_NZ"]
            .into_iter()
            .map(|s| BundleId::parse(s).unwrap())
            .collect();
        ids.sort();

        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_that!(
            rendered,
            elements_are![eq("CurrencyNames_lag"), eq("TimeZoneNames_en_NZ"), eq("TimeZoneNames_wae")]
        );
    }

    #[googletest::test]
    fn test_bundle_id_serde() {
        let id: BundleId = serde_json::from_str(r#""LocaleNames_xog""#).unwrap();

        expect_that!(serde_json::to_string(&id).unwrap(), eq(r#""LocaleNames_xog""#));
        expect_that!(serde_json::from_str::<BundleId>(r#""xog""#).is_err(), eq(true));
    }
}
