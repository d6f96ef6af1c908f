//! Tag → candidate translations.

use std::borrow::Cow;

use crate::dictionary::DictionaryStore;
use crate::inline::InlineRegistry;
use crate::types::{
    TranslationMap,
    TranslationSource,
};

/// A tag of the form `{dictionary:name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopedTag<'a> {
    /// Dictionary name, optionally module-qualified (`module:file`).
    pub dictionary: &'a str,
    /// Tag within that dictionary.
    pub name: &'a str,
}

/// Splits off a leading run of word characters (`[A-Za-z0-9_]`) that is
/// immediately followed by `:`.
fn word_before_colon(text: &str) -> Option<(&str, &str)> {
    let end = text.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))?;
    if end == 0 {
        return None;
    }
    let (word, rest) = text.split_at(end);
    Some((word, rest.strip_prefix(':')?))
}

/// Parses `{dictionary:name}` where the dictionary is `word` or `word:word`.
///
/// When both readings fit, the module-qualified one wins, so `{a:b:c}` is tag
/// `c` in dictionary `a:b`. Anything that does not match exactly, such as an
/// unclosed brace, is not a scoped tag.
#[must_use]
pub fn parse_scoped_tag(tag: &str) -> Option<ScopedTag<'_>> {
    let inner = tag.strip_prefix('{')?.strip_suffix('}')?;
    let (first, rest) = word_before_colon(inner)?;

    if let Some((second, name)) = word_before_colon(rest)
        && !name.contains('\n')
    {
        let dictionary_len = first.len() + 1 + second.len();
        return inner
            .get(..dictionary_len)
            .map(|dictionary| ScopedTag { dictionary, name });
    }

    if rest.contains('\n') {
        return None;
    }
    Some(ScopedTag { dictionary: first, name: rest })
}

/// Finds the translations for a tag in inline entries and dictionaries.
#[derive(Debug)]
pub struct TagResolver {
    store: DictionaryStore,
    inline: InlineRegistry,
    /// Dictionary searched for bare tags.
    default_dictionary: Option<String>,
}

impl TagResolver {
    #[must_use]
    pub fn new(store: DictionaryStore, default_dictionary: Option<String>) -> Self {
        Self { store, inline: InlineRegistry::new(), default_dictionary }
    }

    #[must_use]
    pub const fn inline(&self) -> &InlineRegistry {
        &self.inline
    }

    pub const fn inline_mut(&mut self) -> &mut InlineRegistry {
        &mut self.inline
    }

    pub const fn store_mut(&mut self) -> &mut DictionaryStore {
        &mut self.store
    }

    #[must_use]
    pub fn default_dictionary(&self) -> Option<&str> {
        self.default_dictionary.as_deref()
    }

    /// Looks up the translations of `tag`.
    ///
    /// Inline entries are matched on the full tag text first. Otherwise a
    /// scoped tag is searched in its own dictionary and a bare tag in the
    /// default dictionary; without a default dictionary a bare tag is absent.
    pub fn get_tag(&mut self, tag: &str) -> Option<TranslationMap> {
        if let Some(translations) = self.inline.get(tag) {
            return Some(translations.clone());
        }

        let (dictionary, name) = match parse_scoped_tag(tag) {
            Some(scoped) => (scoped.dictionary, scoped.name),
            None => (self.default_dictionary.as_deref()?, tag),
        };

        self.store.load(dictionary).get(name).cloned()
    }

    /// Candidates for a tag or pass-through of a map already in hand.
    pub fn candidates<'a>(
        &mut self,
        source: TranslationSource<'a>,
    ) -> Option<Cow<'a, TranslationMap>> {
        match source {
            TranslationSource::Map(map) => Some(Cow::Borrowed(map)),
            TranslationSource::Tag(tag) => self.get_tag(tag).map(Cow::Owned),
        }
    }
}
