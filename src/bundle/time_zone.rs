use serde::{
    Deserialize,
    Serialize,
};

/// The six display names of a time zone.
///
/// Any of them may be empty when the locale has no translation for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[String; 6]", into = "[String; 6]")]
pub struct TimeZoneNames {
    pub standard_long: String,
    pub standard_short: String,
    pub daylight_long: String,
    pub daylight_short: String,
    pub generic_long: String,
    pub generic_short: String,
}

impl TimeZoneNames {
    /// Number of variants in a name set.
    pub const LEN: usize = 6;

    /// The names in storage order: standard, daylight, generic (long then short).
    #[must_use]
    pub fn as_array(&self) -> [&str; Self::LEN] {
        [
            &self.standard_long,
            &self.standard_short,
            &self.daylight_long,
            &self.daylight_short,
            &self.generic_long,
            &self.generic_short,
        ]
    }

    /// True when none of the six names is translated.
    #[must_use]
    pub fn is_untranslated(&self) -> bool {
        self.as_array().iter().all(|name| name.is_empty())
    }
}

impl From<[String; 6]> for TimeZoneNames {
    fn from(names: [String; 6]) -> Self {
        let [standard_long, standard_short, daylight_long, daylight_short, generic_long, generic_short] =
            names;
        Self { standard_long, standard_short, daylight_long, daylight_short, generic_long, generic_short }
    }
}

impl From<TimeZoneNames> for [String; 6] {
    fn from(names: TimeZoneNames) -> Self {
        [
            names.standard_long,
            names.standard_short,
            names.daylight_long,
            names.daylight_short,
            names.generic_long,
            names.generic_short,
        ]
    }
}
