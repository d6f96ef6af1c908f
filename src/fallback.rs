//! Picks one text out of a tag's translations.

use crate::context::LanguageContext;
use crate::error::TranslateError;
use crate::types::TranslationMap;

/// Language tried after the selected and default languages.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Selects the text to show for `candidates`.
///
/// # 優先度
/// 1. currently selected language
/// 2. default language
/// 3. `en`
/// 4. any entry (the first by language code)
///
/// # Errors
/// `candidates` is empty.
pub fn select_preferred<'m>(
    candidates: &'m TranslationMap,
    language: &dyn LanguageContext,
) -> Result<&'m str, TranslateError> {
    [language.language(), language.default_language(), FALLBACK_LANGUAGE]
        .into_iter()
        .find_map(|code| candidates.get(code))
        .or_else(|| candidates.values().next())
        .map(String::as_str)
        .ok_or(TranslateError::NoTranslationAvailable)
}
