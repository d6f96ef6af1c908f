//! Merge rule for a definition and its translation overlay.

use crate::types::Dictionary;

/// Merges an overlay of extra translations into a base definition.
///
/// Only tags already defined by `base` are touched; for those, languages from
/// `overlay` are added and win on collision. Tags that exist only in `overlay`
/// are dropped.
#[must_use]
pub fn lang_merge(mut base: Dictionary, overlay: &Dictionary) -> Dictionary {
    for (tag, translations) in &mut base {
        if let Some(extra) = overlay.get(tag) {
            translations.extend(extra.iter().map(|(lang, text)| (lang.clone(), text.clone())));
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::dictionary;

    #[rstest]
    fn overlay_wins_per_language() {
        let base = dictionary(&[("greet", &[("en", "Hello"), ("no", "Hei")])]);
        let overlay = dictionary(&[("greet", &[("en", "Hi")])]);

        let merged = lang_merge(base, &overlay);

        assert_that!(merged, eq(&dictionary(&[("greet", &[("en", "Hi"), ("no", "Hei")])])));
    }

    #[rstest]
    fn overlay_only_tags_are_not_added() {
        let base = dictionary(&[("greet", &[("en", "Hello"), ("no", "Hei")])]);
        let overlay = dictionary(&[("bye", &[("en", "Bye")])]);

        let merged = lang_merge(base.clone(), &overlay);

        assert_that!(merged, eq(&base));
        assert_that!(merged.contains_key("bye"), eq(false));
    }

    #[rstest]
    fn overlay_adds_new_languages() {
        let base = dictionary(&[("greet", &[("en", "Hello")]), ("bye", &[("en", "Bye")])]);
        let overlay = dictionary(&[("greet", &[("nn", "Hei"), ("de", "Hallo")])]);

        let merged = lang_merge(base, &overlay);

        let greet = merged.get("greet");
        assert_that!(greet.map(|t| t.len()), some(eq(3)));
        assert_that!(merged.get("bye").map(|t| t.len()), some(eq(1)));
    }

    #[rstest]
    fn empty_overlay_keeps_base() {
        let base = dictionary(&[("greet", &[("en", "Hello")])]);

        let merged = lang_merge(base.clone(), &Dictionary::new());

        assert_that!(merged, eq(&base));
    }
}
