//! ds-source
//!
//! Read-only access to the hadith CDN (`fawazahmed0/hadith-api`).
//!
//! This crate owns the source abstraction and the HTTP implementation. It
//! knows nothing about pagination or local annotations; callers (browse
//! controller, CLI) decide what to do with the payloads.

mod cdn;
mod error;

pub use cdn::{CdnHadithSource, DEFAULT_BASE_URL};
pub use error::SourceError;

use chrono::{Datelike, NaiveDate};
use ds_schemas::{FeaturedHadith, SectionEntry, SectionPayload, SectionTarget};

/// Size of the pool the featured hadith is drawn from.
pub const FEATURED_POOL: u32 = 40;

/// Pluggable hadith source.
///
/// Object safe so views can hold a `Box<dyn HadithSource>` / `Arc<dyn ...>`.
#[async_trait::async_trait]
pub trait HadithSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    /// The whole hadith array of one section (the upstream is not paginated).
    async fn fetch_section(&self, target: &SectionTarget) -> Result<SectionPayload, SourceError>;

    /// Table of contents of a book, ordered by numeric section id.
    async fn fetch_book_sections(
        &self,
        book: &str,
        lang: &str,
    ) -> Result<Vec<SectionEntry>, SourceError>;

    /// First hadith of entry `number` in the book, for the home card.
    async fn fetch_featured(
        &self,
        book: &str,
        lang: &str,
        number: u32,
    ) -> Result<FeaturedHadith, SourceError>;
}

/// Featured hadith number for `date`, stable over the day, in `1..=FEATURED_POOL`.
pub fn featured_number_for(date: NaiveDate) -> u32 {
    date.ordinal0() % FEATURED_POOL + 1
}

/// Turn a book's `metadata.sections` map into an ordered table of contents.
///
/// Section `"0"` (the untitled preface bucket) is dropped.
pub fn order_sections<'a>(
    sections: impl IntoIterator<Item = (&'a String, &'a String)>,
) -> Vec<SectionEntry> {
    let mut out: Vec<SectionEntry> = sections
        .into_iter()
        .filter(|(id, _)| id.as_str() != "0")
        .map(|(id, title)| SectionEntry {
            id: id.clone(),
            title: title.clone(),
        })
        .collect();
    out.sort_by(|a, b| {
        let ka = a.id.parse::<u64>().ok();
        let kb = b.id.parse::<u64>().ok();
        match (ka, kb) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn featured_number_in_range_and_stable() {
        for day in 1..=366 {
            let d = NaiveDate::from_yo_opt(2024, day).unwrap();
            let n = featured_number_for(d);
            assert!((1..=FEATURED_POOL).contains(&n));
            assert_eq!(n, featured_number_for(d));
        }
        assert_eq!(featured_number_for(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), 1);
        assert_eq!(featured_number_for(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()), 1);
    }

    #[test]
    fn sections_ordered_numerically_without_zero() {
        let mut m = BTreeMap::new();
        for (k, v) in [("0", ""), ("10", "ten"), ("2", "two"), ("1", "one"), ("intro", "x")] {
            m.insert(k.to_string(), v.to_string());
        }
        let ids: Vec<_> = order_sections(&m).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["1", "2", "10", "intro"]);
    }
}
