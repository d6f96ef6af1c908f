//! Memoizing dictionary store.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use super::{
    DEFINITION_SUFFIX,
    LEGACY_SUFFIX,
    read_dictionary_json,
    read_dictionary_legacy,
    with_suffix,
};
use crate::config::DEFAULT_DICTIONARY_DIR;
use crate::context::{
    Configuration,
    ModuleDirResolver,
};
use crate::error::DictionaryError;
use crate::types::Dictionary;

/// Directory below a module root that holds the module's dictionaries.
const MODULE_DICTIONARY_DIR: &str = "dictionaries";

/// Configured default dictionary directory.
#[must_use]
pub fn dictionary_dir(config: &dyn Configuration) -> PathBuf {
    config
        .get_path_value("dictionarydir", Some(DEFAULT_DICTIONARY_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARY_DIR))
}

/// Reads the dictionary stored at `stem`, in whichever format is present.
///
/// `<stem>.definition.json` is preferred over `<stem>.php`. Missing or broken
/// files are logged and yield an empty dictionary.
#[must_use]
pub fn read_dictionary_file(stem: &Path) -> Dictionary {
    tracing::debug!("Reading dictionary [{}]", stem.display());

    let result = if with_suffix(stem, DEFINITION_SUFFIX).exists() {
        read_dictionary_json(stem)
    } else if with_suffix(stem, LEGACY_SUFFIX).exists() {
        read_dictionary_legacy(stem)
    } else {
        Err(DictionaryError::NotFound(stem.to_path_buf()))
    };

    result.unwrap_or_else(|e| {
        tracing::error!("Dictionary unavailable: {e}");
        Dictionary::new()
    })
}

/// Loads named dictionaries on first use and keeps them for its own lifetime.
///
/// A name of the form `module:file` is looked up in the module's
/// `dictionaries/` directory; any other name in the configured dictionary
/// directory. Nothing is ever reloaded, including dictionaries that failed to load.
#[derive(Debug)]
pub struct DictionaryStore {
    config: Arc<dyn Configuration>,
    modules: Arc<dyn ModuleDirResolver>,
    /// Dictionary name → contents
    dictionaries: HashMap<String, Dictionary>,
}

impl DictionaryStore {
    #[must_use]
    pub fn new(config: Arc<dyn Configuration>, modules: Arc<dyn ModuleDirResolver>) -> Self {
        Self { config, modules, dictionaries: HashMap::new() }
    }

    /// Returns the dictionary called `name`, reading it on first request.
    pub fn load(&mut self, name: &str) -> &Dictionary {
        if !self.dictionaries.contains_key(name) {
            let dictionary = read_dictionary_file(&self.stem_path(name));
            self.dictionaries.insert(name.to_string(), dictionary);
        }
        self.dictionaries.entry(name.to_string()).or_default()
    }

    /// File stem (path without format suffix) for a dictionary name.
    #[must_use]
    pub fn stem_path(&self, name: &str) -> PathBuf {
        match name.split_once(':') {
            Some((module, file)) => {
                self.modules.resolve(module).join(MODULE_DICTIONARY_DIR).join(file)
            }
            None => dictionary_dir(self.config.as_ref()).join(name),
        }
    }

    /// Whether `name` has already been loaded.
    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.dictionaries.contains_key(name)
    }
}
