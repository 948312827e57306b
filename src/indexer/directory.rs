//! Imports bundle files from a data directory.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::bundle::AnyBundle;
use crate::config::{
    DataSettings,
    FileMatcher,
};
use crate::error::DataError;
use crate::input::{
    bundle_id_from_path,
    load_bundle_file,
};

/// Finds and parses bundle files under one directory.
#[derive(Debug, Clone)]
pub struct DirectoryImporter {
    /// Include/exclude patterns rooted at the data directory
    matcher: FileMatcher,
    /// Parser thread count
    num_threads: usize,
}

impl DirectoryImporter {
    /// `settings` need not be validated: a thread count of 0 runs on one thread.
    ///
    /// # Errors
    /// Invalid glob patterns in `settings`.
    pub fn new(data_root: PathBuf, settings: &DataSettings) -> Result<Self, DataError> {
        let matcher = FileMatcher::new(data_root, settings)?;
        Ok(Self { matcher, num_threads: settings.loading.thread_count().max(1) })
    }

    #[must_use]
    pub fn data_root(&self) -> &Path {
        self.matcher.data_root()
    }

    /// Lists matching files whose name is a bundle id, sorted by path.
    ///
    /// Matching files with any other name are skipped with a warning.
    ///
    /// # Errors
    /// A directory or entry under the data root that cannot be read.
    pub fn find_bundle_files(&self) -> Result<Vec<PathBuf>, DataError> {
        let data_root = self.matcher.data_root();
        let mut found_files = Vec::new();

        for result in WalkBuilder::new(data_root)
            .hidden(false)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = result.inspect_err(|err| {
                tracing::warn!(%err, "Failed to read directory entry");
            })?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if !self.matcher.is_bundle_file(path) {
                continue;
            }
            if bundle_id_from_path(path).is_none() {
                tracing::warn!(path = %path.display(), "Skipping file: name is not a bundle id");
                continue;
            }

            found_files.push(path.to_path_buf());
        }

        found_files.sort();
        Ok(found_files)
    }

    /// Parses every bundle file in the directory.
    ///
    /// Files are split across worker threads; bundles are returned in path
    /// order regardless of which thread parsed them.
    ///
    /// # Errors
    /// - The data directory does not exist
    /// - A subdirectory or entry cannot be read
    /// - The first file (in path order) that fails to load
    pub fn import(&self) -> Result<Vec<AnyBundle>, DataError> {
        let data_root = self.matcher.data_root();
        if !data_root.is_dir() {
            let error = std::io::Error::new(std::io::ErrorKind::NotFound, "data directory not found");
            return Err(DataError::from(error).in_file(data_root));
        }

        let files = self.find_bundle_files()?;
        tracing::debug!(
            data_root = %data_root.display(),
            files = files.len(),
            threads = self.num_threads,
            "Importing bundle files"
        );

        let chunk_size = files.len().div_ceil(self.num_threads).max(1);
        let results: Vec<Result<AnyBundle, DataError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = files
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk.iter().map(|path| load_bundle_file(path)).collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });

        results.into_iter().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::config::LoadingConfig;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[fixture]
    fn data_dir() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "LocaleNames_xog.json", r#"{ "FR": "Bufalansa" }"#);
        write(temp_dir.path(), "lag/CurrencyNames_lag.json", r#"{ "eur": "Yáuro" }"#);
        write(temp_dir.path(), "TimeZoneNames_en_NZ.json", r#"{ "UTC": ["", "", "", "", "", ""] }"#);
        write(temp_dir.path(), "notes.json", "{}");
        write(temp_dir.path(), "README.md", "# data");
        temp_dir
    }

    fn ids(bundles: &[AnyBundle]) -> Vec<String> {
        bundles.iter().map(|bundle| bundle.id().to_string()).collect()
    }

    #[rstest]
    fn test_find_bundle_files_skips_other_names(data_dir: TempDir) {
        let importer =
            DirectoryImporter::new(data_dir.path().to_path_buf(), &DataSettings::default()).unwrap();

        let files = importer.find_bundle_files().unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|path| path.strip_prefix(data_dir.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_that!(
            names,
            unordered_elements_are![
                eq("LocaleNames_xog.json"),
                eq("TimeZoneNames_en_NZ.json"),
                ends_with("CurrencyNames_lag.json")
            ]
        );
    }

    #[rstest]
    #[case::single_thread(1)]
    #[case::more_threads_than_files(8)]
    fn test_import_parses_all_bundles(data_dir: TempDir, #[case] threads: usize) {
        let settings =
            DataSettings { loading: LoadingConfig { num_threads: Some(threads) }, ..DataSettings::default() };
        let importer = DirectoryImporter::new(data_dir.path().to_path_buf(), &settings).unwrap();

        let bundles = importer.import().unwrap();

        assert_that!(
            ids(&bundles),
            unordered_elements_are![
                eq("LocaleNames_xog"),
                eq("CurrencyNames_lag"),
                eq("TimeZoneNames_en_NZ")
            ]
        );
    }

    #[rstest]
    fn test_import_with_zero_threads_runs_on_one(data_dir: TempDir) {
        let settings =
            DataSettings { loading: LoadingConfig { num_threads: Some(0) }, ..DataSettings::default() };
        let importer = DirectoryImporter::new(data_dir.path().to_path_buf(), &settings).unwrap();

        let bundles = importer.import().unwrap();

        assert_that!(bundles.len(), eq(3));
    }

    #[cfg(unix)]
    #[rstest]
    fn test_import_fails_on_unreadable_subdirectory(data_dir: TempDir) {
        use std::os::unix::fs::PermissionsExt;

        let locked = data_dir.path().join("locked");
        write(data_dir.path(), "locked/LocaleNames_lag.json", r#"{ "TZ": "Taansanía" }"#);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // root ignores directory permissions
        let readable = fs::read_dir(&locked).is_ok();

        let result = DirectoryImporter::new(data_dir.path().to_path_buf(), &DataSettings::default())
            .unwrap()
            .import();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if readable {
            assert_that!(result.unwrap().len(), eq(4));
        } else {
            assert!(matches!(result, Err(DataError::Walk(_))));
        }
    }

    #[rstest]
    fn test_import_respects_exclude_patterns(data_dir: TempDir) {
        let settings =
            DataSettings { exclude_patterns: vec!["lag/**".to_string()], ..DataSettings::default() };
        let importer = DirectoryImporter::new(data_dir.path().to_path_buf(), &settings).unwrap();

        let bundles = importer.import().unwrap();

        assert_that!(ids(&bundles), not(contains(eq("CurrencyNames_lag"))));
        assert_that!(bundles.len(), eq(2));
    }

    #[rstest]
    fn test_import_fails_on_invalid_bundle(data_dir: TempDir) {
        write(data_dir.path(), "CurrencyNames_xog.json", r#"{ "ugx": 1 }"#);
        let importer =
            DirectoryImporter::new(data_dir.path().to_path_buf(), &DataSettings::default()).unwrap();

        let error = importer.import().unwrap_err();

        assert_that!(error.to_string(), contains_substring("CurrencyNames_xog.json"));
        assert_that!(error.to_string(), contains_substring("expected a string"));
    }

    #[rstest]
    fn test_import_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let importer = DirectoryImporter::new(temp_dir.path().join("missing"), &DataSettings::default())
            .unwrap();

        let result = importer.import();

        assert!(matches!(result, Err(DataError::File { .. })));
    }

    #[rstest]
    fn test_import_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let importer =
            DirectoryImporter::new(temp_dir.path().to_path_buf(), &DataSettings::default()).unwrap();

        assert_that!(importer.import().unwrap(), is_empty());
    }
}
