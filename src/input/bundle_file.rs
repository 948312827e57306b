//! Bundle file input definitions
//!
//! A bundle file is a JSON object whose file stem is the bundle id:
//!
//! ```json
//! // CurrencyNames_lag.json
//! { "TZS": "TSh", "eur": "Yáuro" }
//!
//! // TimeZoneNames_wae.json
//! { "Europe/Paris": ["Mitteleuropäisi Standardzit", "MEZ", "…", "…", "…", "…"] }
//! ```
//!
//! `serde_json` alone would drop authored order and silently keep the last of
//! two duplicate keys, so entries are read from a tree-sitter syntax tree and
//! string literals are decoded with `serde_json`.

use std::path::Path;

use crate::bundle::{
    AnyBundle,
    Bundle,
    Entry,
    TimeZoneNames,
};
use crate::error::DataError;
use crate::locale::{
    BundleId,
    ValueShape,
};
use crate::types::SourcePosition;

/// A value type that can be read from a bundle file.
pub trait EntryValue: Sized {
    /// Describes the expected JSON shape in error messages.
    const EXPECTED: &'static str;

    /// Reads the value from its syntax node, `None` if the shape is wrong.
    fn from_node(node: tree_sitter::Node<'_>, source: &[u8]) -> Option<Self>;
}

impl EntryValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_node(node: tree_sitter::Node<'_>, source: &[u8]) -> Option<Self> {
        decode_string(node, source)
    }
}

impl EntryValue for TimeZoneNames {
    const EXPECTED: &'static str = "an array of 6 strings";

    fn from_node(node: tree_sitter::Node<'_>, source: &[u8]) -> Option<Self> {
        if node.kind() != "array" {
            return None;
        }
        let mut cursor = node.walk();
        let names = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .map(|child| decode_string(child, source))
            .collect::<Option<Vec<_>>>()?;
        let names: [String; Self::LEN] = names.try_into().ok()?;
        Some(Self::from(names))
    }
}

/// Decodes a JSON string literal node, resolving escapes.
fn decode_string(node: tree_sitter::Node<'_>, source: &[u8]) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let text = node.utf8_text(source).ok()?;
    serde_json::from_str(text).ok()
}

/// Parses bundle text into a typed bundle.
///
/// # Errors
/// - `Syntax` if the text is not JSON
/// - `NotAnObject` if the top level is not an object
/// - `InvalidValue` if a value does not have the shape `V` expects
/// - `DuplicateKey` if a key appears twice
pub fn parse_bundle<V: EntryValue>(id: BundleId, text: &str) -> Result<Bundle<V>, DataError> {
    // Syntax check first: serde_json reports line and column of the problem.
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(DataError::NotAnObject { bundle: id });
    }

    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&tree_sitter_json::LANGUAGE.into())?;
    let tree = parser.parse(text, None).ok_or(DataError::ParseFailed)?;
    let source = text.as_bytes();

    let root = tree.root_node();
    let mut root_cursor = root.walk();
    let Some(object) = root.named_children(&mut root_cursor).find(|n| n.kind() == "object")
    else {
        return Err(DataError::NotAnObject { bundle: id });
    };

    let mut entries = Vec::new();
    let mut positions = Vec::new();
    let mut cursor = object.walk();
    for pair in object.named_children(&mut cursor) {
        if pair.kind() != "pair" {
            continue;
        }
        let (Some(key_node), Some(value_node)) =
            (pair.child_by_field_name("key"), pair.child_by_field_name("value"))
        else {
            continue;
        };
        let Some(key) = decode_string(key_node, source) else {
            tracing::warn!("Failed to decode key at {}", SourcePosition::from(key_node.start_position()));
            continue;
        };

        let position = SourcePosition::from(key_node.start_position());
        let Some(value) = V::from_node(value_node, source) else {
            return Err(DataError::InvalidValue {
                bundle: id,
                key,
                expected: V::EXPECTED,
                position: value_node.start_position().into(),
            });
        };

        entries.push(Entry { key, value });
        positions.push(position);
    }

    Bundle::with_positions(id, entries, &positions)
}

/// Parses bundle text, choosing the value shape from the bundle category.
///
/// # Errors
/// Same as [`parse_bundle`].
pub fn parse_any_bundle(id: BundleId, text: &str) -> Result<AnyBundle, DataError> {
    match id.category.shape() {
        ValueShape::Text => parse_bundle::<String>(id, text).map(AnyBundle::from),
        ValueShape::TimeZone => parse_bundle::<TimeZoneNames>(id, text).map(AnyBundle::from),
    }
}

/// Derives the bundle id from a file name.
///
/// # Examples
/// - `data/CurrencyNames_lag.json` → `CurrencyNames_lag`
/// - `TimeZoneNames_en-NZ.json` → `TimeZoneNames_en_NZ`
/// - `README.json` → `None`
#[must_use]
pub fn bundle_id_from_path(file_path: &Path) -> Option<BundleId> {
    let stem = file_path.file_stem()?.to_str()?;
    BundleId::parse(stem).ok()
}

/// Loads a bundle file.
///
/// # Errors
/// Returns error if the file name is not a bundle id, or if reading or parsing
/// fails. The error carries the file path.
pub fn load_bundle_file(file_path: &Path) -> Result<AnyBundle, DataError> {
    let stem = file_path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
    let id = BundleId::parse(&stem).map_err(|e| DataError::from(e).in_file(file_path))?;

    tracing::debug!(path = %file_path.display(), bundle = %id, "Loading bundle file");

    let content =
        std::fs::read_to_string(file_path).map_err(|e| DataError::from(e).in_file(file_path))?;
    parse_any_bundle(id, &content).map_err(|e| e.in_file(file_path))
}
