//! Bundle data input

pub mod bundle_file;

pub use bundle_file::{
    EntryValue,
    bundle_id_from_path,
    load_bundle_file,
    parse_any_bundle,
    parse_bundle,
};
