use ds_schemas::{Hadith, SectionTarget};
use ds_store::{BookmarkStore, ReactionStore};

/// What a list row shows for one hadith.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemState {
    pub is_bookmarked: bool,
    pub active_reaction: Option<String>,
}

/// Look up the annotations for `hadith` as shown under `target`.
///
/// Always reads the stores directly; callers re-run it on every render.
pub fn item_state(
    target: &SectionTarget,
    hadith: &Hadith,
    bookmarks: &BookmarkStore,
    reactions: &ReactionStore,
) -> ItemState {
    let key = target.hadith_ref(hadith.hadithnumber).key();
    ItemState {
        is_bookmarked: bookmarks.contains(&key),
        active_reaction: reactions.get(&key).map(str::to_string),
    }
}

/// [`item_state`] for every hadith in `items`, in order.
pub fn reconcile_page<'a>(
    target: &SectionTarget,
    items: &'a [Hadith],
    bookmarks: &BookmarkStore,
    reactions: &ReactionStore,
) -> Vec<(&'a Hadith, ItemState)> {
    items
        .iter()
        .map(|h| (h, item_state(target, h, bookmarks, reactions)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_schemas::HadithReference;
    use ds_store::MemoryBackend;
    use std::sync::Arc;

    fn hadith(n: u64) -> Hadith {
        Hadith {
            hadithnumber: n,
            text: format!("h{n}"),
            reference: HadithReference::default(),
        }
    }

    #[test]
    fn reflects_store_changes_between_calls() {
        let be = Arc::new(MemoryBackend::new());
        let mut bookmarks = BookmarkStore::open(be.clone());
        let mut reactions = ReactionStore::open(be);
        let target = SectionTarget::new("bukhari", "1", "eng");
        let h = hadith(5);

        assert_eq!(
            item_state(&target, &h, &bookmarks, &reactions),
            ItemState::default()
        );

        bookmarks.toggle(&target.hadith_ref(5), &h.text).unwrap();
        reactions.react(&target.hadith_ref(5), "😊").unwrap();
        let s = item_state(&target, &h, &bookmarks, &reactions);
        assert!(s.is_bookmarked);
        assert_eq!(s.active_reaction.as_deref(), Some("😊"));

        bookmarks.toggle(&target.hadith_ref(5), &h.text).unwrap();
        assert!(!item_state(&target, &h, &bookmarks, &reactions).is_bookmarked);
    }

    #[test]
    fn language_is_part_of_the_join() {
        let be = Arc::new(MemoryBackend::new());
        let mut bookmarks = BookmarkStore::open(be.clone());
        let reactions = ReactionStore::open(be);
        let eng = SectionTarget::new("bukhari", "1", "eng");
        let ara = SectionTarget::new("bukhari", "1", "ara");
        bookmarks.toggle(&eng.hadith_ref(1), "t").unwrap();

        assert!(item_state(&eng, &hadith(1), &bookmarks, &reactions).is_bookmarked);
        assert!(!item_state(&ara, &hadith(1), &bookmarks, &reactions).is_bookmarked);
    }

    #[test]
    fn reconcile_page_keeps_order() {
        let be = Arc::new(MemoryBackend::new());
        let mut bookmarks = BookmarkStore::open(be.clone());
        let reactions = ReactionStore::open(be);
        let target = SectionTarget::new("bukhari", "1", "eng");
        bookmarks.toggle(&target.hadith_ref(2), "t").unwrap();

        let items: Vec<_> = (1..=3).map(hadith).collect();
        let rows = reconcile_page(&target, &items, &bookmarks, &reactions);
        let flags: Vec<_> = rows
            .iter()
            .map(|(h, s)| (h.hadithnumber, s.is_bookmarked))
            .collect();
        assert_eq!(flags, vec![(1, false), (2, true), (3, false)]);
    }
}
