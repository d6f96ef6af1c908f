//! Public translation API.

use std::sync::Arc;

use crate::config::TranslateSettings;
use crate::context::{
    Configuration,
    Language,
    LanguageContext,
    ModuleDirResolver,
    ModuleDirs,
};
use crate::dictionary::{
    DictionaryStore,
    dictionary_dir,
    read_dictionary_file,
};
use crate::error::TranslateError;
use crate::fallback::select_preferred;
use crate::inline::InlineTranslation;
use crate::placeholder::apply_replacements;
use crate::resolver::TagResolver;
use crate::types::{
    TranslationMap,
    TranslationSource,
};

/// Dictionary holding the built-in attribute names.
pub const ATTRIBUTES_DICTIONARY: &str = "attributes";

/// Prefix of attribute tags in [`ATTRIBUTES_DICTIONARY`].
const ATTRIBUTE_TAG_PREFIX: &str = "attribute_";

/// Text returned for a tag that resolves nowhere.
///
/// With `fallback_placeholder` the tag is wrapped as `not translated (<tag>)`,
/// otherwise it is echoed unchanged.
#[must_use]
pub fn not_translated(tag: &str, fallback_placeholder: bool) -> String {
    if fallback_placeholder { format!("not translated ({tag})") } else { tag.to_string() }
}

/// Resolves tags into text for one caller.
///
/// Owns its dictionary cache and inline translations; both only grow. Create
/// one per request or execution context: there is no internal locking.
#[derive(Debug)]
pub struct Translator {
    config: Arc<dyn Configuration>,
    language: Arc<dyn LanguageContext>,
    resolver: TagResolver,
}

impl Translator {
    #[must_use]
    pub fn new(
        config: Arc<dyn Configuration>,
        modules: Arc<dyn ModuleDirResolver>,
        language: Arc<dyn LanguageContext>,
        default_dictionary: Option<String>,
    ) -> Self {
        let store = DictionaryStore::new(Arc::clone(&config), modules);
        Self { config, language, resolver: TagResolver::new(store, default_dictionary) }
    }

    /// Builds a translator from loaded settings, using their default dictionary
    /// and module directory.
    #[must_use]
    pub fn from_settings(settings: TranslateSettings, language: Language) -> Self {
        let modules = ModuleDirs::from_config(&settings);
        let default_dictionary = settings.default_dictionary.clone();
        Self::new(Arc::new(settings), Arc::new(modules), Arc::new(language), default_dictionary)
    }

    #[must_use]
    pub fn language(&self) -> &dyn LanguageContext {
        self.language.as_ref()
    }

    #[must_use]
    pub fn default_dictionary(&self) -> Option<&str> {
        self.resolver.default_dictionary()
    }

    /// All translations of `tag`, or `None` if it resolves nowhere.
    pub fn get_tag(&mut self, tag: &str) -> Option<TranslationMap> {
        self.resolver.get_tag(tag)
    }

    /// # Errors
    /// `translations` is empty.
    pub fn get_preferred_translation<'m>(
        &self,
        translations: &'m TranslationMap,
    ) -> Result<&'m str, TranslateError> {
        select_preferred(translations, self.language.as_ref())
    }

    /// Translates a tag (or a map already in hand) into the current language.
    ///
    /// Replacement keys are substituted in order; a key without a value is
    /// itself translated as a tag. An unknown tag yields [`not_translated`].
    ///
    /// # Errors
    /// The tag resolved to an empty translation map.
    pub fn t<'a>(
        &mut self,
        source: impl Into<TranslationSource<'a>>,
        replacements: &[(&str, Option<&str>)],
        fallback_placeholder: bool,
    ) -> Result<String, TranslateError> {
        let source: TranslationSource<'a> = source.into();

        let Some(candidates) = self.resolver.candidates(source) else {
            let tag = source.as_tag().unwrap_or_default();
            tracing::info!("Looking up [{tag}]: not translated at all");
            return Ok(not_translated(tag, fallback_placeholder));
        };

        let translated = select_preferred(&candidates, self.language.as_ref())?.to_string();

        Ok(apply_replacements(translated, replacements, |key| self.translate_key(key)))
    }

    /// Translates a replacement key that came without a value.
    fn translate_key(&mut self, key: &str) -> String {
        self.t(key, &[], true).unwrap_or_else(|e| {
            tracing::warn!("Replacement [{key}] could not be translated: {e}");
            not_translated(key, true)
        })
    }

    /// Registers a translation for `tag` that shadows every dictionary.
    ///
    /// A plain string is stored as English.
    ///
    /// # Errors
    /// The translation is an empty map.
    pub fn include_inline_translation(
        &mut self,
        tag: &str,
        translation: impl Into<InlineTranslation>,
    ) -> Result<(), TranslateError> {
        self.resolver.inline_mut().register(tag, translation)
    }

    /// Reads dictionary `file` and adds all of its tags as inline translations.
    ///
    /// The file is looked up in the dictionary directory of `config_override`
    /// when given, else of this translator's configuration. Tags already
    /// registered are replaced whole.
    pub fn include_language_file(
        &mut self,
        file: &str,
        config_override: Option<&dyn Configuration>,
    ) {
        let config: &dyn Configuration = match config_override {
            Some(config) => config,
            None => self.config.as_ref(),
        };
        let entries = read_dictionary_file(&dictionary_dir(config).join(file));
        tracing::debug!("Merging language array. Loading [{file}]");
        self.resolver.inline_mut().merge_file(entries);
    }

    /// Translates an attribute name such as `urn:oid:2.5.4.3` or `displayName`.
    ///
    /// The name is ASCII lower-cased with `:` replaced by `_`, then looked up in the
    /// configured extra dictionary and in the `attributes` dictionary (as
    /// `attribute_<name>`). Returns `name` unchanged if neither has it.
    ///
    /// # Errors
    /// The matching entry has no translations.
    pub fn get_attribute_translation(&mut self, name: &str) -> Result<String, TranslateError> {
        let normalized = name.to_ascii_lowercase().replace(':', "_");

        if let Some(extra) = self.config.get_string("attributes.extradictionary", None)
            && let Some(translations) = self.resolver.store_mut().load(&extra).get(&normalized)
        {
            return select_preferred(translations, self.language.as_ref()).map(str::to_string);
        }

        let tag = format!("{ATTRIBUTE_TAG_PREFIX}{normalized}");
        if let Some(translations) =
            self.resolver.store_mut().load(ATTRIBUTES_DICTIONARY).get(&tag)
        {
            return select_preferred(translations, self.language.as_ref()).map(str::to_string);
        }

        Ok(name.to_string())
    }
}
