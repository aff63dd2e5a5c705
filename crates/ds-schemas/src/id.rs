//! Composite identifier builder.
//!
//! The composite key is the only join between fetched hadith content and the
//! locally persisted bookmarks / reactions. Changing the format below makes
//! every stored annotation unreachable, so any change MUST bump
//! [`KEY_FORMAT_VERSION`] and ship a rewrite of persisted keys.

/// String key `book:section:number:lang`.
pub type CompositeKey = String;

/// Version of the key layout produced by [`make_id`].
pub const KEY_FORMAT_VERSION: u32 = 1;

/// Build the composite key for one hadith.
///
/// Field values are used exactly as given (no case folding, no trimming).
pub fn make_id(book: &str, section: &str, number: u64, lang: &str) -> CompositeKey {
    format!("{book}:{section}:{number}:{lang}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn joins_fields_in_order() {
        assert_eq!(make_id("bukhari", "1", 5, "eng"), "bukhari:1:5:eng");
    }

    #[test]
    fn deterministic_for_same_tuple() {
        let a = make_id("muslim", "12", 300, "ara");
        let b = make_id("muslim", "12", 300, "ara");
        assert_eq!(a, b);
    }

    #[test]
    fn no_normalisation_of_fields() {
        assert_ne!(make_id("Bukhari", "1", 5, "eng"), make_id("bukhari", "1", 5, "eng"));
        assert_ne!(make_id("bukhari", " 1", 5, "eng"), make_id("bukhari", "1", 5, "eng"));
    }

    #[test]
    fn distinct_catalog_tuples_never_collide() {
        let mut seen = HashSet::new();
        for book in crate::BOOKS.iter().map(|b| b.code) {
            for lang in crate::LANGUAGES.iter().map(|l| l.code) {
                for section in ["1", "2", "10", "97"] {
                    for number in [1u64, 2, 10, 21, 7563] {
                        assert!(
                            seen.insert(make_id(book, section, number, lang)),
                            "collision for {book}/{section}/{number}/{lang}"
                        );
                    }
                }
            }
        }
    }
}
