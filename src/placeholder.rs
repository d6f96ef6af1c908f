//! Placeholder substitution in translated text.

use std::borrow::Cow;

/// Replaces each key with its value, one key after another in the given order.
///
/// A key without a value (or with an empty one) is resolved through `resolve`.
/// Because keys are applied in sequence, a value that contains a later key's
/// text is itself rewritten by that later key. Empty keys are ignored.
pub fn apply_replacements<F>(
    text: String,
    replacements: &[(&str, Option<&str>)],
    mut resolve: F,
) -> String
where
    F: FnMut(&str) -> String,
{
    replacements.iter().filter(|(key, _)| !key.is_empty()).fold(text, |text, (key, value)| {
        let value = match value {
            Some(value) if !value.is_empty() => Cow::Borrowed(*value),
            _ => Cow::Owned(resolve(key)),
        };
        text.replace(key, &value)
    })
}
