//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    TranslateSettings,
};

/// Name of the configuration file looked up in a root directory.
pub const CONFIG_FILE_NAME: &str = ".tag-translate.json";

/// ルートディレクトリから設定を読み込む
///
/// `.tag-translate.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_dir(root: &Path) -> Result<Option<TranslateSettings>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// Reads settings from an explicit file.
///
/// Relative directories in the file are resolved against the file's own
/// directory unless `baseDir` is set.
pub fn load_from_file(config_path: &Path) -> Result<TranslateSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let mut settings: TranslateSettings = serde_json::from_str(&content)?;

    if settings.base_dir.is_none() {
        settings.base_dir = config_path.parent().map(Path::to_path_buf);
    }

    Ok(settings)
}
