//! Errors surfaced by translation and dictionary loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::dictionary::LegacyParseError;

/// Hard failures of the translation API.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateError {
    /// A tag resolved, but its translation map has no entries.
    #[error("Nothing to return from translation: no language variant is available")]
    NoTranslationAvailable,

    /// An inline translation was neither a string nor a non-empty language map.
    #[error("Inline translation should be a string or a language map, got {found}")]
    InvalidTranslationShape {
        /// Short description of the rejected value.
        found: &'static str,
    },
}

/// Why a dictionary could not be read.
///
/// Loading never fails outright: the store logs this and falls back to an
/// empty dictionary.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// Neither a definition file nor a legacy file exists for the stem.
    #[error("No dictionary file found at [{}]", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read dictionary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dictionary file: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition file parsed, but holds no tags.
    #[error("Invalid dictionary definition file [{}]", .0.display())]
    InvalidDefinition(PathBuf),

    #[error("Failed to read legacy dictionary: {0}")]
    Legacy(#[from] LegacyParseError),
}
