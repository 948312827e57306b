//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    DataSettings,
    loader,
};

/// ワークスペースの設定と、そこから解決したデータディレクトリを保持する
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 検証済みの設定
    current_settings: DataSettings,

    /// ワークスペースのルートパス
    workspace_root: Option<PathBuf>,

    /// `dataDirectory` をワークスペースルート基準で解決したパス
    data_directory: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定（組み込みバンドルのみ）で作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ワークスペースの `.display-names.json` を読み込み、データディレクトリを解決する
    ///
    /// 設定ファイルがなければデフォルト設定を使う。失敗した場合は現在の状態を変更しない。
    ///
    /// # Errors
    /// - 設定ファイルの読み込み・パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let settings = match &workspace_root {
            Some(root) => loader::load_from_workspace(root)?.unwrap_or_default(),
            None => DataSettings::default(),
        };
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.data_directory = resolve_data_directory(&settings, workspace_root.as_deref());
        tracing::debug!(
            workspace_root = ?workspace_root,
            data_directory = ?self.data_directory,
            include_builtin = settings.include_builtin,
            "Settings loaded"
        );
        self.current_settings = settings;
        self.workspace_root = workspace_root;
        Ok(())
    }

    /// 設定を差し替える。ワークスペースルートは維持する
    ///
    /// # Errors
    /// バリデーションエラー
    pub fn update_settings(&mut self, new_settings: DataSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.data_directory = resolve_data_directory(&new_settings, self.workspace_root.as_deref());
        tracing::debug!(data_directory = ?self.data_directory, "Settings updated");
        self.current_settings = new_settings;
        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &DataSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// 解決済みのデータディレクトリ。`dataDirectory` 未指定なら `None`
    #[must_use]
    pub fn data_directory(&self) -> Option<&Path> {
        self.data_directory.as_deref()
    }
}

/// 相対パスはワークスペースルートからの相対として扱う
fn resolve_data_directory(settings: &DataSettings, workspace_root: Option<&Path>) -> Option<PathBuf> {
    let dir = settings.data_directory.as_ref()?;
    match workspace_root {
        Some(root) if dir.is_relative() => Some(root.join(dir)),
        _ => Some(dir.clone()),
    }
}
