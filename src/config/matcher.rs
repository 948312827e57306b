//! File pattern matcher for bundle files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::DataSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidFilePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files under a data directory against configured glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    data_root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(data_root: PathBuf, settings: &DataSettings) -> Result<Self, MatcherError> {
        let include_set = Self::build_glob_set(
            std::slice::from_ref(&settings.file_pattern),
            |pattern, source| MatcherError::InvalidFilePattern { pattern, source },
        )?;

        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { data_root, include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Returns true if the path matches `filePattern` but not `excludePatterns`.
    ///
    /// The path must be absolute and under the data root.
    #[must_use]
    pub fn is_bundle_file(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.data_root).ok() else {
            return false;
        };

        self.is_bundle_file_relative(relative_path)
    }

    /// Returns true if the path matches `filePattern` but not `excludePatterns`.
    ///
    /// The path must be relative to the data root.
    #[must_use]
    pub fn is_bundle_file_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}
