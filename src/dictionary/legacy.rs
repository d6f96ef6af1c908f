//! Reader for the legacy `<name>.php` dictionary format.
//!
//! A legacy file builds its dictionary in the `$lang` variable. The file is
//! never executed: it is parsed with tree-sitter, and assignments to `$lang`
//! or its subscripts (`$lang['tag'] = ...`) are evaluated in source order as
//! long as their right-hand side is a literal. Everything else is skipped.
//! [`migrate_legacy`] converts such a file to the JSON definition format.

mod escape;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use thiserror::Error;
use tree_sitter::{
    Language,
    Node,
    Parser,
    Query,
    QueryCursor,
    StreamingIteratorMut,
};

use super::{
    LEGACY_SUFFIX,
    with_suffix,
};
use crate::error::DictionaryError;
use crate::types::{
    Dictionary,
    TranslationMap,
};

/// Variable a legacy file binds its dictionary to.
const DICTIONARY_VARIABLE: &str = "$lang";

/// Assignment query, see `queries/php/legacy-dictionary.scm`.
const ASSIGNMENT_QUERY_SOURCE: &str = include_str!("../../queries/php/legacy-dictionary.scm");

/// Capture of the assignment target.
const TARGET_CAPTURE: &str = "legacy.target";

/// Capture of the assigned value.
const VALUE_CAPTURE: &str = "legacy.value";

/// Parsed once per process.
static ASSIGNMENT_QUERY: OnceLock<Option<Query>> = OnceLock::new();

#[derive(Error, Debug)]
pub enum LegacyParseError {
    /// Error when failing to set the language for the parser
    #[error("Failed to set language for parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),

    /// Error when failing to parse source code
    #[error("Failed to parse source code")]
    ParseFailed,

    /// The file is not valid PHP.
    #[error("line {line}: syntax error")]
    Syntax {
        /// First line with an error (1-indexed).
        line: usize,
    },
}

/// tree-sitter grammar for PHP with its `<?php` tags.
fn php_language() -> Language {
    tree_sitter_php::LANGUAGE_PHP.into()
}

/// Loads the cached assignment query.
fn assignment_query() -> Option<&'static Query> {
    ASSIGNMENT_QUERY
        .get_or_init(|| {
            Query::new(&php_language(), ASSIGNMENT_QUERY_SOURCE)
                .map_err(|e| tracing::error!("Failed to parse legacy dictionary query: {e:?}"))
                .ok()
        })
        .as_ref()
}

/// 1-indexed line a node starts on.
fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Named children of a node, without comments.
fn operands(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).filter(|child| child.kind() != "comment").collect()
}

/// Finds the first error or missing node below `node`.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let child = node.children(&mut cursor).find(|child| child.has_error())?;
    first_error(child)
}

/// Value of a literal, reduced to what a dictionary needs.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Literal {
    /// Scalars are kept as their string form.
    Text(String),
    /// Entries in insertion order, keys already assigned.
    Array(Vec<(String, Literal)>),
}

/// Integer value of an array key, if PHP would store it as one.
fn integer_key(key: &str) -> Option<i64> {
    key.parse::<i64>().ok().filter(|n| n.to_string() == key)
}

/// Key PHP gives an entry appended without one: one past the largest integer key.
fn next_index(entries: &[(String, Literal)]) -> String {
    entries
        .iter()
        .filter_map(|(key, _)| integer_key(key))
        .max()
        .map_or(0, |n| n.saturating_add(1).max(0))
        .to_string()
}

/// Stores `value` at `path` below `target`, creating arrays on the way.
///
/// A `None` key appends. An existing key keeps its position and gets the new value.
fn assign(target: &mut Literal, path: &[Option<String>], value: Literal) {
    let Some((key, rest)) = path.split_first() else {
        *target = value;
        return;
    };
    if !matches!(target, Literal::Array(_)) {
        *target = Literal::Array(Vec::new());
    }
    let Literal::Array(entries) = target else {
        return;
    };

    let key = key.clone().unwrap_or_else(|| next_index(entries));
    if let Some((_, slot)) = entries.iter_mut().find(|(existing, _)| *existing == key) {
        assign(slot, rest, value);
        return;
    }
    entries.push((key, Literal::Array(Vec::new())));
    if let Some((_, slot)) = entries.last_mut() {
        assign(slot, rest, value);
    }
}

/// Evaluates literal expressions of one source file.
struct Evaluator<'s> {
    /// Source text the nodes point into.
    source: &'s [u8],
}

impl<'s> Evaluator<'s> {
    /// Source text of a node.
    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.source).unwrap_or_default()
    }

    /// Value of a literal expression, or `None` when it would need running code.
    fn value(&self, node: Node<'_>) -> Option<Literal> {
        let text = self.text(node);
        match node.kind() {
            "string" => escape::single_quoted(text).map(Literal::Text),
            "encapsed_string" => escape::double_quoted(text).map(Literal::Text),
            "heredoc" | "nowdoc" => escape::heredoc(text).map(Literal::Text),
            "integer" | "float" => Some(Literal::Text(text.to_string())),
            "boolean" => Some(Literal::Text(text.to_ascii_lowercase())),
            "null" => Some(Literal::Text(String::new())),
            "unary_op_expression" => self.signed_number(node),
            "parenthesized_expression" => self.value(*operands(node).first()?),
            "binary_expression" => self.concatenation(node),
            "array_creation_expression" => Some(self.array(node)),
            _ => None,
        }
    }

    /// Like [`Self::value`], but only for scalars.
    fn text_value(&self, node: Node<'_>) -> Option<String> {
        match self.value(node)? {
            Literal::Text(text) => Some(text),
            Literal::Array(_) => None,
        }
    }

    /// `-1`, `+2.5`
    fn signed_number(&self, node: Node<'_>) -> Option<Literal> {
        let operand = *operands(node).last()?;
        if !matches!(operand.kind(), "integer" | "float") {
            return None;
        }
        let sign = if self.text(node).trim_start().starts_with('-') { "-" } else { "" };
        Some(Literal::Text(format!("{sign}{}", self.text(operand))))
    }

    /// `'a' . 'b'`
    fn concatenation(&self, node: Node<'_>) -> Option<Literal> {
        let operator = node.child_by_field_name("operator")?;
        if operator.kind() != "." {
            return None;
        }
        let left = self.text_value(node.child_by_field_name("left")?)?;
        let right = self.text_value(node.child_by_field_name("right")?)?;
        Some(Literal::Text(left + &right))
    }

    /// `array(...)` or `[...]`. Entries that are not literals are skipped.
    fn array(&self, node: Node<'_>) -> Literal {
        let mut array = Literal::Array(Vec::new());

        for element in operands(node) {
            if element.kind() != "array_element_initializer" {
                continue;
            }
            let parts = operands(element);
            let (key, value) = match parts.as_slice() {
                [value] => (None, *value),
                [key, value] => (Some(*key), *value),
                _ => continue,
            };

            let key = match key.map(|key| self.text_value(key)) {
                None => None,
                Some(Some(key)) => Some(key),
                Some(None) => {
                    tracing::warn!("Line {}: skipping entry with a computed key", line_of(element));
                    continue;
                }
            };
            let Some(value) = self.value(value) else {
                tracing::warn!("Line {}: skipping entry that is not a literal", line_of(element));
                continue;
            };
            assign(&mut array, &[key], value);
        }

        array
    }

    /// Key path of an assignment target rooted at `$lang`.
    ///
    /// `$lang` is `[]`, `$lang['a']['en']` is `[a, en]` and `$lang[]` is `[None]`.
    fn target_path(&self, node: Node<'_>) -> Option<Vec<Option<String>>> {
        match node.kind() {
            "variable_name" => (self.text(node) == DICTIONARY_VARIABLE).then(Vec::new),
            "subscript_expression" => {
                let parts = operands(node);
                let (object, index) = parts.split_first()?;
                let mut path = self.target_path(*object)?;
                let key = match index.first() {
                    Some(index) => Some(self.text_value(*index)?),
                    None => None,
                };
                path.push(key);
                Some(path)
            }
            _ => None,
        }
    }
}

/// Reads tags and their language maps out of the final `$lang` value.
fn into_dictionary(literal: Literal) -> Dictionary {
    let Literal::Array(tags) = literal else {
        tracing::debug!("Legacy dictionary binds {DICTIONARY_VARIABLE} to a scalar");
        return Dictionary::new();
    };

    tags.into_iter()
        .filter_map(|(tag, translations)| {
            let Literal::Array(languages) = translations else {
                tracing::debug!("Skipping tag [{tag}]: translations are not an array");
                return None;
            };
            let map: TranslationMap = languages
                .into_iter()
                .filter_map(|(lang, text)| match text {
                    Literal::Text(text) => Some((lang, text)),
                    Literal::Array(_) => None,
                })
                .collect();
            Some((tag, map))
        })
        .collect()
}

/// Reads the dictionary built in `$lang` by legacy source text.
///
/// Returns `Ok(None)` when the source never assigns `$lang`. Assignments are
/// applied in source order, so a later `$lang = ...` replaces everything
/// before it and `$lang['tag'] = ...` adds or replaces one tag.
///
/// # Errors
/// The source is not valid PHP.
pub fn parse_legacy(source: &str) -> Result<Option<Dictionary>, LegacyParseError> {
    let mut parser = Parser::new();
    parser.set_language(&php_language()).map_err(LegacyParseError::LanguageSetup)?;
    let tree = parser.parse(source, None).ok_or(LegacyParseError::ParseFailed)?;
    let root_node = tree.root_node();

    if root_node.has_error() {
        let line = first_error(root_node).map_or(1, line_of);
        return Err(LegacyParseError::Syntax { line });
    }

    let query = assignment_query().ok_or(LegacyParseError::ParseFailed)?;
    let target_index = query.capture_index_for_name(TARGET_CAPTURE);
    let value_index = query.capture_index_for_name(VALUE_CAPTURE);
    let source_bytes = source.as_bytes();

    let mut assignments: Vec<(Node<'_>, Node<'_>)> = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root_node, source_bytes);
    while let Some(match_) = matches.next_mut() {
        let captures = match_.captures;
        let capture = |index: Option<u32>| captures.iter().find(|c| Some(c.index) == index);
        if let (Some(target), Some(value)) = (capture(target_index), capture(value_index)) {
            assignments.push((target.node, value.node));
        }
    }
    // ソースコードの位置順で適用する
    assignments.sort_by_key(|(target, _)| target.start_byte());

    let evaluator = Evaluator { source: source_bytes };
    let mut bound: Option<Literal> = None;

    for (target, value) in assignments {
        let Some(path) = evaluator.target_path(target) else {
            continue;
        };
        let Some(value) = evaluator.value(value) else {
            tracing::warn!(
                "Line {}: {DICTIONARY_VARIABLE} is assigned something other than a literal",
                line_of(target)
            );
            continue;
        };
        assign(bound.get_or_insert_with(|| Literal::Array(Vec::new())), &path, value);
    }

    Ok(bound.map(into_dictionary))
}

/// Reads `<stem>.php`. A file that never binds `$lang` yields an empty dictionary.
///
/// # Errors
/// The file is unreadable or its `$lang` literal is malformed.
pub fn read_dictionary_legacy(stem: &Path) -> Result<Dictionary, DictionaryError> {
    let path = with_suffix(stem, LEGACY_SUFFIX);
    let source = std::fs::read_to_string(&path)?;

    Ok(parse_legacy(&source)?.unwrap_or_else(|| {
        tracing::debug!("No {DICTIONARY_VARIABLE} binding in [{}]", path.display());
        Dictionary::new()
    }))
}

/// Converts `<stem>.php` into the text of an equivalent definition file.
///
/// Tags are written in sorted order so repeated migrations produce identical output.
///
/// # Errors
/// The legacy file is unreadable or malformed.
pub fn migrate_legacy(stem: &Path) -> Result<String, DictionaryError> {
    let dictionary = read_dictionary_legacy(stem)?;
    let sorted: BTreeMap<&String, &TranslationMap> = dictionary.iter().collect();
    Ok(serde_json::to_string_pretty(&sorted)?)
}
