use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::context::Configuration;

/// Dictionary directory used when the configuration names none.
pub const DEFAULT_DICTIONARY_DIR: &str = "dictionaries/";

/// Module root used when the configuration names none.
pub const DEFAULT_MODULE_DIR: &str = "modules/";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "language.default")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslateSettings {
    /// Relative directories are resolved against this one.
    /// Set to the configuration file's directory when loaded from disk.
    pub base_dir: Option<PathBuf>,

    pub dictionary_dir: String,

    /// Root holding `<module>/dictionaries/` for module-qualified dictionary names.
    pub module_dir: String,

    /// Dictionary searched for bare tags.
    /// If unset, bare tags only resolve through inline translations.
    pub default_dictionary: Option<String>,

    pub language: LanguageConfig,
    pub attributes: AttributesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageConfig {
    pub default: String,

    /// Languages a caller may select.
    ///
    /// - empty: any language code is accepted (default)
    /// - otherwise: selecting an unlisted language keeps the default active
    pub available: Vec<String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self { default: "en".to_string(), available: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributesConfig {
    /// Dictionary searched before the built-in `attributes` dictionary.
    pub extra_dictionary: Option<String>,
}

impl Default for TranslateSettings {
    fn default() -> Self {
        Self {
            base_dir: None,
            dictionary_dir: DEFAULT_DICTIONARY_DIR.to_string(),
            module_dir: DEFAULT_MODULE_DIR.to_string(),
            default_dictionary: None,
            language: LanguageConfig::default(),
            attributes: AttributesConfig::default(),
        }
    }
}

impl TranslateSettings {
    /// # Errors
    /// - Required field is empty
    /// - Optional name is present but empty
    /// - Default language is not among the available languages
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.dictionary_dir.is_empty() {
            errors.push(ValidationError::new(
                "dictionaryDir",
                "The directory cannot be empty. Example: \"dictionaries/\"",
            ));
        }

        if self.module_dir.is_empty() {
            errors.push(ValidationError::new(
                "moduleDir",
                "The directory cannot be empty. Example: \"modules/\"",
            ));
        }

        if let Some(name) = &self.default_dictionary
            && name.is_empty()
        {
            errors.push(ValidationError::new(
                "defaultDictionary",
                "The dictionary name cannot be empty. Specify a name or remove this field",
            ));
        }

        if let Some(name) = &self.attributes.extra_dictionary
            && name.is_empty()
        {
            errors.push(ValidationError::new(
                "attributes.extraDictionary",
                "The dictionary name cannot be empty. Specify a name or remove this field",
            ));
        }

        if self.language.default.is_empty() {
            errors.push(ValidationError::new(
                "language.default",
                "The default language cannot be empty. Example: \"en\"",
            ));
        } else if !self.language.available.is_empty()
            && !self.language.available.contains(&self.language.default)
        {
            errors.push(ValidationError::new(
                "language.available",
                format!(
                    "The default language '{}' must be one of the available languages",
                    self.language.default
                ),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Resolves a configured directory against `base_dir`.
    #[must_use]
    pub fn resolve_path(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Configuration for TranslateSettings {
    fn get_string(&self, key: &str, default: Option<&str>) -> Option<String> {
        let value = match key {
            "dictionarydir" => Some(self.dictionary_dir.as_str()),
            "moduledir" => Some(self.module_dir.as_str()),
            "defaultdictionary" => self.default_dictionary.as_deref(),
            "language.default" => Some(self.language.default.as_str()),
            "attributes.extradictionary" => self.attributes.extra_dictionary.as_deref(),
            _ => None,
        };
        value.or(default).map(str::to_string)
    }

    fn get_path_value(&self, key: &str, default: Option<&str>) -> Option<PathBuf> {
        self.get_string(key, default).map(|value| self.resolve_path(&value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = TranslateSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"defaultDictionary": "general", "language": {"default": "nb"}}"#;

        let settings: TranslateSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.dictionary_dir, eq(DEFAULT_DICTIONARY_DIR));
        assert_that!(settings.default_dictionary, some(eq("general")));
        assert_that!(settings.language.default, eq("nb"));
        assert_that!(settings.language.available, is_empty());
    }

    #[rstest]
    fn default_settings_accept_any_language() {
        let settings = TranslateSettings::default();

        assert_that!(settings.language.default, eq("en"));
        assert_that!(settings.language.available, is_empty());
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: TranslateSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings.language.default, eq("en"));
        assert_that!(settings.default_dictionary, none());
        assert_that!(settings.attributes.extra_dictionary, none());
    }

    #[rstest]
    fn validate_empty_dictionary_dir() {
        let settings =
            TranslateSettings { dictionary_dir: String::new(), ..TranslateSettings::default() };

        let errors = settings.validate().unwrap_err();

        assert_that!(errors, len(eq(1)));
        assert_that!(errors[0].field_path, eq("dictionaryDir"));
    }

    #[rstest]
    #[case::default_dictionary(Some(String::new()), None, "defaultDictionary")]
    #[case::extra_dictionary(None, Some(String::new()), "attributes.extraDictionary")]
    fn validate_empty_optional_names(
        #[case] default_dictionary: Option<String>,
        #[case] extra_dictionary: Option<String>,
        #[case] field: &str,
    ) {
        let settings = TranslateSettings {
            default_dictionary,
            attributes: AttributesConfig { extra_dictionary },
            ..TranslateSettings::default()
        };

        let errors = settings.validate().unwrap_err();

        assert_that!(errors, len(eq(1)));
        assert_that!(errors[0].field_path, eq(field));
    }

    #[rstest]
    fn validate_default_language_not_available() {
        let settings = TranslateSettings {
            language: LanguageConfig {
                default: "en".to_string(),
                available: vec!["nb".to_string(), "nn".to_string()],
            },
            ..TranslateSettings::default()
        };

        let errors = settings.validate().unwrap_err();

        assert_that!(errors[0].field_path, eq("language.available"));
    }

    #[rstest]
    fn validate_collects_multiple_errors() {
        let settings = TranslateSettings {
            dictionary_dir: String::new(),
            module_dir: String::new(),
            language: LanguageConfig { default: String::new(), available: Vec::new() },
            ..TranslateSettings::default()
        };

        let errors = settings.validate().unwrap_err();

        assert_that!(errors, len(eq(3)));
        let message = ConfigError::ValidationErrors(errors).to_string();
        assert_that!(message, contains_substring("1. dictionaryDir"));
        assert_that!(message, contains_substring("3. language.default"));
    }

    #[rstest]
    fn get_string_known_and_unknown_keys() {
        let settings = TranslateSettings {
            default_dictionary: Some("general".to_string()),
            ..TranslateSettings::default()
        };

        assert_that!(settings.get_string("defaultdictionary", None), some(eq("general")));
        assert_that!(settings.get_string("attributes.extradictionary", None), none());
        assert_that!(
            settings.get_string("attributes.extradictionary", Some("fallback")),
            some(eq("fallback"))
        );
        assert_that!(settings.get_string("no.such.key", Some("x")), some(eq("x")));
    }

    #[rstest]
    fn get_path_value_resolves_against_base_dir() {
        let settings = TranslateSettings {
            base_dir: Some(PathBuf::from("/srv/app")),
            ..TranslateSettings::default()
        };

        assert_that!(
            settings.get_path_value("dictionarydir", None),
            some(eq(&PathBuf::from("/srv/app/dictionaries/")))
        );
        assert_that!(
            settings.get_path_value("custom", Some("/abs/dir")),
            some(eq(&PathBuf::from("/abs/dir")))
        );
    }

    #[rstest]
    fn get_path_value_without_base_dir_is_unchanged() {
        let settings = TranslateSettings::default();

        assert_that!(
            settings.get_path_value("moduledir", None),
            some(eq(&PathBuf::from(DEFAULT_MODULE_DIR)))
        );
    }
}
