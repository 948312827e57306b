use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;
use crate::locale::{
    BundleId,
    IdError,
};
use crate::types::SourcePosition;

/// Raised by bundle lookups.
///
/// A missing key is never replaced by a default; choosing a parent locale or
/// root bundle is the caller's decision.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Key '{key}' not found in bundle {bundle}")]
    KeyNotFound { bundle: BundleId, key: String },
}

/// Defines errors that may occur while building bundles from data
#[derive(Error, Debug)]
pub enum DataError {
    /// Bundle text is not valid JSON
    #[error("Invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("Bundle {bundle} must be a JSON object of entries")]
    NotAnObject { bundle: BundleId },

    #[error(
        "Duplicate key '{key}' in bundle {bundle} at {} (first defined at {})",
        format_position(.second),
        format_position(.first)
    )]
    DuplicateKey {
        bundle: BundleId,
        key: String,
        /// `None` when the entries did not come from a file.
        first: Option<SourcePosition>,
        second: Option<SourcePosition>,
    },

    #[error("Invalid value for key '{key}' in bundle {bundle} at {position}: expected {expected}")]
    InvalidValue { bundle: BundleId, key: String, expected: &'static str, position: SourcePosition },

    /// Error when failing to set the language for the parser
    #[error("Failed to set language for parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),

    #[error("Failed to parse bundle text")]
    ParseFailed,

    /// The embedded bundles failed to parse when first accessed
    #[error("Built-in bundles are malformed: {0}")]
    Builtin(&'static DataError),

    #[error("Bundle {0} is defined more than once")]
    DuplicateBundle(BundleId),

    #[error(transparent)]
    InvalidId(#[from] IdError),

    #[error("Failed to read bundle file: {0}")]
    Io(#[from] std::io::Error),

    /// A directory under the data root could not be walked
    #[error("Failed to read data directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// Wraps any of the above with the file that caused it
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<DataError>,
    },
}

impl DataError {
    /// Attaches the path of the file being loaded.
    #[must_use]
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into(), source: Box::new(self) }
    }
}

fn format_position(position: &Option<SourcePosition>) -> String {
    position.map_or_else(|| "<unknown>".to_string(), |p| p.to_string())
}
