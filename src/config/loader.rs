//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    DataSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".display-names.json";

/// ワークスペースから設定を読み込む
///
/// `.display-names.json` ファイルを探して読み込む。コメントと末尾カンマを許可する。
///
/// # Arguments
/// * `workspace_root` - ワークスペースのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSONC 構文エラー
/// - 設定の型エラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<DataSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    parse_settings(&content).map(Some)
}

/// 設定テキストをパースする（空ファイルはデフォルト設定）
fn parse_settings(content: &str) -> Result<DataSettings, ConfigError> {
    let value = jsonc_parser::parse_to_serde_value(content, &jsonc_parser::ParseOptions::default())
        .map_err(|e| ConfigError::SyntaxError(e.to_string()))?;

    match value {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(DataSettings::default()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_workspace`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_workspace_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"dataDirectory": "cldr"}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.is_ok());
        let settings = result.unwrap();
        assert!(settings.is_some());
        assert_eq!(settings.unwrap().data_directory, Some(PathBuf::from("cldr")));
    }

    /// `load_from_workspace`: コメントと末尾カンマを含む設定
    #[rstest]
    fn test_load_from_workspace_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{
  // built-in data is replaced by the files below
  "includeBuiltin": false,
  "excludePatterns": ["drafts/**",],
}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let settings = load_from_workspace(temp_dir.path()).unwrap().unwrap();

        assert!(!settings.include_builtin);
        assert_eq!(settings.exclude_patterns, vec!["drafts/**".to_string()]);
    }

    /// `load_from_workspace`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_workspace_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// `load_from_workspace`: 構文エラー
    #[rstest]
    fn test_load_from_workspace_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"dataDirectory": }"#).unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::SyntaxError(_))));
    }

    /// `load_from_workspace`: 型エラー
    #[rstest]
    fn test_load_from_workspace_wrong_type() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"includeBuiltin": "yes"}"#)
            .unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    /// `parse_settings`: 空ファイルはデフォルト
    #[rstest]
    fn test_parse_settings_empty_file() {
        let settings = parse_settings("").unwrap();

        assert!(settings.include_builtin);
        assert_eq!(settings.file_pattern, "**/*.json");
    }
}
