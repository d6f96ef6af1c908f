//! tag-translate
//!
//! タグを辞書から現在の言語の文字列に解決する翻訳ライブラリ

pub mod config;
pub mod context;
pub mod dictionary;
pub mod error;
pub mod fallback;
pub mod inline;
pub mod placeholder;
pub mod resolver;
pub mod translator;
pub mod types;

mod test_utils;

pub use error::{
    DictionaryError,
    TranslateError,
};
pub use translator::Translator;
