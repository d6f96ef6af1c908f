//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use crate::config::TranslateSettings;
use crate::types::{
    Dictionary,
    TranslationMap,
};

/// テスト用の `TranslationMap` を作成する
pub(crate) fn translation_map(entries: &[(&str, &str)]) -> TranslationMap {
    entries.iter().map(|(lang, text)| ((*lang).to_string(), (*text).to_string())).collect()
}

/// テスト用の `Dictionary` を作成する
pub(crate) fn dictionary(entries: &[(&str, &[(&str, &str)])]) -> Dictionary {
    entries
        .iter()
        .map(|(tag, translations)| ((*tag).to_string(), translation_map(translations)))
        .collect()
}

/// `root` を基準ディレクトリとする設定を作成する
pub(crate) fn settings_for(root: &Path) -> TranslateSettings {
    TranslateSettings { base_dir: Some(root.to_path_buf()), ..TranslateSettings::default() }
}

/// `dir/<name>.definition.json` (と overlay) を書き込み、拡張子なしのパスを返す
pub(crate) fn write_json_dictionary(
    dir: &Path,
    name: &str,
    definition: &Value,
    overlay: Option<&Value>,
) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(format!("{name}.definition.json")), definition.to_string()).unwrap();
    if let Some(overlay) = overlay {
        fs::write(dir.join(format!("{name}.translation.json")), overlay.to_string()).unwrap();
    }
    dir.join(name)
}
