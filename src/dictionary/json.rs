//! Reader for `<name>.definition.json` with its optional `<name>.translation.json` overlay.

use std::path::Path;

use serde_json::Value;

use super::{
    DEFINITION_SUFFIX,
    TRANSLATION_SUFFIX,
    lang_merge,
    with_suffix,
};
use crate::error::DictionaryError;
use crate::types::{
    Dictionary,
    TranslationMap,
};

/// Builds a dictionary from parsed JSON of the shape `{tag: {lang: text}}`.
///
/// `null` leaves become empty strings and other non-string leaves keep their
/// JSON text form. Tags whose value is not an object are skipped.
#[must_use]
pub fn dictionary_from_json(json: &Value) -> Dictionary {
    let Value::Object(tags) = json else {
        return Dictionary::new();
    };

    tags.iter()
        .filter_map(|(tag, translations)| {
            let Value::Object(languages) = translations else {
                tracing::debug!("Skipping tag [{tag}]: translations are not an object");
                return None;
            };
            let map: TranslationMap = languages
                .iter()
                .map(|(lang, text)| {
                    let text = match text {
                        Value::String(s) => s.clone(),
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    (lang.clone(), text)
                })
                .collect();
            Some((tag.clone(), map))
        })
        .collect()
}

fn read_json_file(path: &Path) -> Result<Dictionary, DictionaryError> {
    let content = std::fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&content)?;
    Ok(dictionary_from_json(&json))
}

/// Reads the definition file at `<stem>.definition.json` and merges the overlay
/// at `<stem>.translation.json` into it when present.
///
/// # Errors
/// The definition file is unreadable, not JSON, or defines no tags.
/// A broken overlay is logged and ignored.
pub fn read_dictionary_json(stem: &Path) -> Result<Dictionary, DictionaryError> {
    let definition_file = with_suffix(stem, DEFINITION_SUFFIX);
    let definition = read_json_file(&definition_file)?;
    if definition.is_empty() {
        return Err(DictionaryError::InvalidDefinition(definition_file));
    }

    let translation_file = with_suffix(stem, TRANSLATION_SUFFIX);
    if !translation_file.exists() {
        return Ok(definition);
    }

    match read_json_file(&translation_file) {
        Ok(overlay) if !overlay.is_empty() => Ok(lang_merge(definition, &overlay)),
        Ok(_) => Ok(definition),
        Err(e) => {
            tracing::warn!("Ignoring translation file [{}]: {e}", translation_file.display());
            Ok(definition)
        }
    }
}
