//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    TranslateSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: TranslateSettings,

    /// 設定ファイルを探したルートディレクトリ
    config_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: TranslateSettings::default(), config_root: None }
    }

    /// ルートディレクトリから設定を読み込む
    ///
    /// 設定ファイルがない場合はデフォルト値を使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, config_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from root: {:?}", config_root);

        let settings = if let Some(root) = &config_root {
            loader::load_from_dir(root)?.map_or_else(TranslateSettings::default, |found| {
                tracing::debug!("Loaded settings: {:?}", found);
                found
            })
        } else {
            TranslateSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.config_root = config_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 指定されたファイルから設定を読み込む
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_file(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        let settings = loader::load_from_file(config_path)?;

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.config_root = settings.base_dir.clone();
        self.current_settings = settings;

        Ok(())
    }

    /// 設定を更新する
    pub fn update_settings(&mut self, new_settings: TranslateSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &TranslateSettings {
        &self.current_settings
    }

    /// 設定を取り出す
    #[must_use]
    pub fn into_settings(self) -> TranslateSettings {
        self.current_settings
    }

    /// ルートディレクトリを取得
    #[must_use]
    pub const fn config_root(&self) -> Option<&PathBuf> {
        self.config_root.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings().language.default, "en");
        assert!(manager.config_root().is_none());
    }

    /// load_settings: config_root が None の場合
    #[rstest]
    fn test_load_settings_without_root() {
        let mut manager = ConfigManager::new();

        let result = manager.load_settings(None);

        assert!(result.is_ok());
        assert!(manager.get_settings().default_dictionary.is_none());
        assert!(manager.config_root().is_none());
    }

    /// load_settings: 設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"language": {"default": "nb", "available": ["nb", "en"]}}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().language.default, "nb");
        assert!(manager.config_root().is_some());
    }

    /// load_settings: バリデーションエラーは設定を更新しない
    #[rstest]
    fn test_load_settings_invalid_keeps_previous() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"dictionaryDir": ""}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert_eq!(manager.get_settings().dictionary_dir, "dictionaries/");
        assert!(manager.config_root().is_none());
    }

    /// load_file: 明示的なファイルから読み込む
    #[rstest]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("translate.json");
        fs::write(&path, r#"{"defaultDictionary": "login"}"#).unwrap();

        let mut manager = ConfigManager::new();
        manager.load_file(&path).unwrap();

        assert_eq!(manager.get_settings().default_dictionary.as_deref(), Some("login"));
        assert_eq!(manager.config_root().map(PathBuf::as_path), Some(temp_dir.path()));
    }

    /// update_settings: 有効な設定で更新成功
    #[rstest]
    fn test_update_settings_valid() {
        let mut manager = ConfigManager::new();
        let mut new_settings = TranslateSettings::default();
        new_settings.default_dictionary = Some("general".to_string());

        let result = manager.update_settings(new_settings);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().default_dictionary.as_deref(), Some("general"));
    }

    /// update_settings: 無効な設定でエラー
    #[rstest]
    fn test_update_settings_invalid() {
        let mut manager = ConfigManager::new();
        let mut new_settings = TranslateSettings::default();
        new_settings.language.default = String::new(); // 空文字は無効

        let result = manager.update_settings(new_settings);

        assert!(result.is_err());
    }
}
