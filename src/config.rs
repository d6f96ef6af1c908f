//! Configuration loading and validation.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_file,
};
pub use manager::ConfigManager;
pub use types::{
    AttributesConfig,
    ConfigError,
    DEFAULT_DICTIONARY_DIR,
    DEFAULT_MODULE_DIR,
    LanguageConfig,
    TranslateSettings,
    ValidationError,
};
