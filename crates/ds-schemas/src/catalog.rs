//! Selectable books and languages.

/// One selectable entry (API code + display label).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub label: &'static str,
}

pub const DEFAULT_BOOK: &str = "bukhari";
pub const DEFAULT_LANG: &str = "eng";

/// jsDelivr mirror of `fawazahmed0/hadith-api`.
pub const DEFAULT_API_BASE: &str = "https://cdn.jsdelivr.net/gh/fawazahmed0/hadith-api@1";

/// Hadiths per page in a section list.
pub const DEFAULT_PAGE_SIZE: usize = 20;

pub const BOOKS: &[CatalogEntry] = &[
    CatalogEntry { code: "abudawud", label: "Sunan Abu Dawud" },
    CatalogEntry { code: "abuhanifa", label: "Musnad Imam Abu Hanifa" },
    CatalogEntry { code: "bukhari", label: "Sahih al Bukhari" },
    CatalogEntry { code: "dehlawi", label: "Forty Hadith of Shah Waliullah Dehlawi" },
    CatalogEntry { code: "ibnmajah", label: "Sunan Ibn Majah" },
    CatalogEntry { code: "malik", label: "Muwatta Malik" },
    CatalogEntry { code: "muslim", label: "Sahih Muslim" },
    CatalogEntry { code: "nasai", label: "Sunan an Nasai" },
    CatalogEntry { code: "nawawi", label: "Forty Hadith of an-Nawawi" },
    CatalogEntry { code: "qudsi", label: "Forty Hadith Qudsi" },
    CatalogEntry { code: "tirmidhi", label: "Jami At Tirmidhi" },
];

pub const LANGUAGES: &[CatalogEntry] = &[
    CatalogEntry { code: "eng", label: "English" },
    CatalogEntry { code: "ara", label: "Arabic" },
    CatalogEntry { code: "fr", label: "French" },
];

/// Emoji offered on every list item.
pub const REACTIONS: &[&str] = &["👍", "❤️", "😊", "🤲"];

pub fn find_book(code: &str) -> Option<&'static CatalogEntry> {
    BOOKS.iter().find(|b| b.code == code)
}

pub fn find_language(code: &str) -> Option<&'static CatalogEntry> {
    LANGUAGES.iter().find(|l| l.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_catalog() {
        assert!(find_book(DEFAULT_BOOK).is_some());
        assert!(find_language(DEFAULT_LANG).is_some());
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(find_book("unknown").is_none());
        assert!(find_language("de").is_none());
    }
}
