//! Core types used throughout the project.

use std::collections::{
    BTreeMap,
    HashMap,
};

/// Language code → translated text for a single tag.
///
/// Kept sorted by language code so that the "any available language"
/// fallback always picks the same entry for the same map.
pub type TranslationMap = BTreeMap<String, String>;

/// Unscoped tag → translations, as read from one dictionary.
pub type Dictionary = HashMap<String, TranslationMap>;

/// What a caller asks to translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationSource<'a> {
    /// A bare (`name`) or scoped (`{dictionary:name}`) tag.
    Tag(&'a str),
    /// Translations the caller already has in hand.
    Map(&'a TranslationMap),
}

impl<'a> TranslationSource<'a> {
    /// Returns the tag text, if this source is a tag.
    #[must_use]
    pub const fn as_tag(&self) -> Option<&'a str> {
        match *self {
            Self::Tag(tag) => Some(tag),
            Self::Map(_) => None,
        }
    }
}

impl<'a> From<&'a str> for TranslationSource<'a> {
    fn from(tag: &'a str) -> Self {
        Self::Tag(tag)
    }
}

impl<'a> From<&'a String> for TranslationSource<'a> {
    fn from(tag: &'a String) -> Self {
        Self::Tag(tag.as_str())
    }
}

impl<'a> From<&'a TranslationMap> for TranslationSource<'a> {
    fn from(map: &'a TranslationMap) -> Self {
        Self::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn as_tag_returns_tag_text() {
        let source = TranslationSource::from("{errors:title}");

        assert_that!(source.as_tag(), some(eq("{errors:title}")));
    }

    #[rstest]
    fn as_tag_is_none_for_maps() {
        let map = TranslationMap::from([("en".to_string(), "Hello".to_string())]);
        let source = TranslationSource::from(&map);

        assert_that!(source.as_tag(), none());
    }
}
