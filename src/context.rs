//! Collaborators the translator reads its environment through.

use std::fmt::Debug;
use std::path::PathBuf;

use crate::config::{
    DEFAULT_MODULE_DIR,
    LanguageConfig,
};

/// Read access to string and path settings.
pub trait Configuration: Debug {
    /// Returns the string stored under `key`, or `default` when unset.
    fn get_string(&self, key: &str, default: Option<&str>) -> Option<String>;

    /// Like [`Configuration::get_string`], but resolves the value as a path.
    fn get_path_value(&self, key: &str, default: Option<&str>) -> Option<PathBuf>;
}

/// Maps a module name to the module's root directory.
pub trait ModuleDirResolver: Debug {
    fn resolve(&self, module: &str) -> PathBuf;
}

/// Current and default language of the caller.
pub trait LanguageContext: Debug {
    fn language(&self) -> &str;
    fn default_language(&self) -> &str;
}

/// Modules laid out as `<root>/<module>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDirs {
    root: PathBuf,
}

impl ModuleDirs {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses the configured `moduledir`.
    #[must_use]
    pub fn from_config(config: &dyn Configuration) -> Self {
        let root = config
            .get_path_value("moduledir", Some(DEFAULT_MODULE_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODULE_DIR));
        Self { root }
    }
}

impl ModuleDirResolver for ModuleDirs {
    fn resolve(&self, module: &str) -> PathBuf {
        self.root.join(module)
    }
}

/// Language selection restricted to a set of available languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    selected: Option<String>,
    default: String,
    /// Empty means every language code is accepted.
    available: Vec<String>,
}

impl Language {
    #[must_use]
    pub fn new(default: impl Into<String>, available: Vec<String>) -> Self {
        Self { selected: None, default: default.into(), available }
    }

    #[must_use]
    pub fn from_settings(settings: &LanguageConfig) -> Self {
        Self::new(settings.default.clone(), settings.available.clone())
    }

    /// Selects `code` as the current language.
    ///
    /// Returns `false` and keeps the previous selection when `code` is not available.
    pub fn set_language(&mut self, code: &str) -> bool {
        if !self.is_available(code) {
            tracing::debug!("Language [{code}] is not available, keeping [{}]", self.language());
            return false;
        }
        self.selected = Some(code.to_string());
        true
    }

    #[must_use]
    pub fn is_available(&self, code: &str) -> bool {
        self.available.is_empty() || self.available.iter().any(|lang| lang == code)
    }
}

impl LanguageContext for Language {
    fn language(&self) -> &str {
        self.selected.as_deref().unwrap_or(&self.default)
    }

    fn default_language(&self) -> &str {
        &self.default
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::config::TranslateSettings;

    #[rstest]
    fn module_dirs_join_module_name() {
        let modules = ModuleDirs::new("/srv/modules");

        assert_that!(modules.resolve("core"), eq(&PathBuf::from("/srv/modules/core")));
    }

    #[rstest]
    fn module_dirs_from_config_uses_base_dir() {
        let settings = TranslateSettings {
            base_dir: Some(PathBuf::from("/srv/app")),
            module_dir: "mods".to_string(),
            ..TranslateSettings::default()
        };

        let modules = ModuleDirs::from_config(&settings);

        assert_that!(modules.resolve("saml"), eq(&PathBuf::from("/srv/app/mods/saml")));
    }

    #[rstest]
    fn language_defaults_to_default_language() {
        let language = Language::new("nb", Vec::new());

        assert_that!(language.language(), eq("nb"));
        assert_that!(language.default_language(), eq("nb"));
    }

    #[rstest]
    fn set_language_accepts_any_code_without_restriction() {
        let mut language = Language::new("en", Vec::new());

        assert_that!(language.set_language("fr"), eq(true));
        assert_that!(language.language(), eq("fr"));
        assert_that!(language.default_language(), eq("en"));
    }

    #[rstest]
    fn default_settings_allow_selecting_any_language() {
        let mut language = Language::from_settings(&LanguageConfig::default());

        assert_that!(language.set_language("nb"), eq(true));
        assert_that!(language.language(), eq("nb"));
    }

    #[rstest]
    #[case::available("nn", true, "nn")]
    #[case::unavailable("de", false, "en")]
    fn set_language_respects_available_list(
        #[case] code: &str,
        #[case] accepted: bool,
        #[case] expected: &str,
    ) {
        let mut language =
            Language::new("en", vec!["en".to_string(), "nb".to_string(), "nn".to_string()]);

        assert_that!(language.set_language(code), eq(accepted));
        assert_that!(language.language(), eq(expected));
    }
}
