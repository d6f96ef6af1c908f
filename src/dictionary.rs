//! Dictionary acquisition: file formats, merging and the per-translator cache.
/// `<name>.definition.json` + `<name>.translation.json` reader
mod json;
/// tree-sitter reader for `<name>.php` dictionaries
mod legacy;
/// Definition/overlay merge rule
mod merge;
/// Memoizing dictionary store
mod store;

use std::ffi::OsString;
use std::path::{
    Path,
    PathBuf,
};

pub use json::{
    dictionary_from_json,
    read_dictionary_json,
};
pub use legacy::{
    LegacyParseError,
    migrate_legacy,
    parse_legacy,
    read_dictionary_legacy,
};
pub use merge::lang_merge;
pub use store::{
    DictionaryStore,
    dictionary_dir,
    read_dictionary_file,
};

/// Suffix of the authoritative definition file.
pub const DEFINITION_SUFFIX: &str = ".definition.json";

/// Suffix of the optional translation overlay.
pub const TRANSLATION_SUFFIX: &str = ".translation.json";

/// Suffix of the legacy single-file format.
pub const LEGACY_SUFFIX: &str = ".php";

/// Appends `suffix` to the file name of `stem` (`dir/name` → `dir/name.suffix`).
fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(stem.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}
