//! Bundle file discovery and import

pub mod directory;

pub use directory::DirectoryImporter;
