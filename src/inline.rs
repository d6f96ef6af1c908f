//! Translations registered at runtime instead of being read from a dictionary.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::TranslateError;
use crate::types::{
    Dictionary,
    TranslationMap,
};

/// Language a plain-string inline translation is stored under.
pub const INLINE_TEXT_LANGUAGE: &str = "en";

/// Shape of an inline translation accepted at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineTranslation {
    /// Stored under [`INLINE_TEXT_LANGUAGE`].
    Text(String),
    Map(TranslationMap),
}

impl InlineTranslation {
    /// Converts into the stored language map.
    ///
    /// # Errors
    /// The translation is an empty map.
    pub fn into_map(self) -> Result<TranslationMap, TranslateError> {
        match self {
            Self::Text(text) => Ok(TranslationMap::from([(INLINE_TEXT_LANGUAGE.to_string(), text)])),
            Self::Map(map) if map.is_empty() => {
                Err(TranslateError::InvalidTranslationShape { found: "an empty map" })
            }
            Self::Map(map) => Ok(map),
        }
    }
}

impl From<&str> for InlineTranslation {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for InlineTranslation {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<TranslationMap> for InlineTranslation {
    fn from(map: TranslationMap) -> Self {
        Self::Map(map)
    }
}

/// Describes a JSON value for [`TranslateError::InvalidTranslationShape`].
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Value> for InlineTranslation {
    type Error = TranslateError;

    /// Accepts a string, or an object whose values are all strings.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self::Text(text)),
            Value::Object(languages) => languages
                .into_iter()
                .map(|(lang, text)| match text {
                    Value::String(text) => Ok((lang, text)),
                    other => Err(TranslateError::InvalidTranslationShape {
                        found: match other {
                            Value::Object(_) => "a nested object",
                            _ => "an object with non-string values",
                        },
                    }),
                })
                .collect::<Result<TranslationMap, _>>()
                .map(Self::Map),
            other => Err(TranslateError::InvalidTranslationShape { found: json_kind(&other) }),
        }
    }
}

/// Tag → translations registered directly. Shadows every dictionary.
#[derive(Debug, Default, Clone)]
pub struct InlineRegistry {
    entries: HashMap<String, TranslationMap>,
}

impl InlineRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `translation` for `tag`, replacing any previous entry.
    ///
    /// # Errors
    /// `translation` is an empty map.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        translation: impl Into<InlineTranslation>,
    ) -> Result<(), TranslateError> {
        let tag: String = tag.into();
        let translation: InlineTranslation = translation.into();
        let map = translation.into_map()?;
        tracing::debug!("Adding inline translation for tag [{tag}]");
        self.entries.insert(tag, map);
        Ok(())
    }

    /// Unions a whole dictionary into the registry. Each incoming tag replaces
    /// the existing entry entirely; languages are not merged.
    pub fn merge_file(&mut self, entries: Dictionary) {
        self.entries.extend(entries);
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&TranslationMap> {
        self.entries.get(tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{
        dictionary,
        translation_map,
    };

    #[rstest]
    fn register_string_is_stored_as_english() {
        let mut registry = InlineRegistry::new();

        registry.register("title", "Welcome").unwrap();

        assert_that!(registry.get("title"), some(eq(&translation_map(&[("en", "Welcome")]))));
    }

    #[rstest]
    fn register_map_is_stored_as_is() {
        let mut registry = InlineRegistry::new();
        let map = translation_map(&[("nb", "Velkommen"), ("de", "Willkommen")]);

        registry.register("title", map.clone()).unwrap();

        assert_that!(registry.get("title"), some(eq(&map)));
    }

    #[rstest]
    fn register_replaces_previous_entry() {
        let mut registry = InlineRegistry::new();
        registry.register("title", translation_map(&[("nb", "Hei"), ("en", "Hi")])).unwrap();

        registry.register("title", translation_map(&[("de", "Hallo")])).unwrap();

        assert_that!(registry.get("title"), some(eq(&translation_map(&[("de", "Hallo")]))));
        assert_that!(registry.len(), eq(1));
    }

    #[rstest]
    fn register_empty_map_is_rejected() {
        let mut registry = InlineRegistry::new();

        let result = registry.register("title", TranslationMap::new());

        assert_that!(
            result,
            err(eq(TranslateError::InvalidTranslationShape { found: "an empty map" }))
        );
        assert_that!(registry.is_empty(), eq(true));
    }

    #[rstest]
    fn merge_file_replaces_whole_entries() {
        let mut registry = InlineRegistry::new();
        registry.register("greet", translation_map(&[("en", "Hello"), ("nb", "Hei")])).unwrap();

        registry.merge_file(dictionary(&[
            ("greet", &[("en", "Hi")]),
            ("bye", &[("en", "Bye")]),
        ]));

        assert_that!(registry.get("greet"), some(eq(&translation_map(&[("en", "Hi")]))));
        assert_that!(registry.get("bye"), some(eq(&translation_map(&[("en", "Bye")]))));
    }

    #[rstest]
    fn try_from_json_string() {
        let translation = InlineTranslation::try_from(json!("Hello")).unwrap();

        assert_that!(translation, eq(&InlineTranslation::Text("Hello".to_string())));
    }

    #[rstest]
    fn try_from_json_object() {
        let translation = InlineTranslation::try_from(json!({ "en": "Hi", "nb": "Hei" })).unwrap();

        assert_that!(
            translation,
            eq(&InlineTranslation::Map(translation_map(&[("en", "Hi"), ("nb", "Hei")])))
        );
    }

    #[rstest]
    #[case::number(json!(42), "a number")]
    #[case::null(json!(null), "null")]
    #[case::array(json!(["en", "Hi"]), "an array")]
    #[case::boolean(json!(true), "a boolean")]
    #[case::non_string_value(json!({ "en": 1 }), "an object with non-string values")]
    #[case::nested(json!({ "en": { "us": "Hi" } }), "a nested object")]
    fn try_from_json_rejects_other_shapes(#[case] value: Value, #[case] found: &'static str) {
        let result = InlineTranslation::try_from(value);

        assert_that!(result, err(eq(&TranslateError::InvalidTranslationShape { found })));
    }
}
