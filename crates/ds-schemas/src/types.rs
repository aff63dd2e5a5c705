use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{DEFAULT_BOOK, DEFAULT_LANG};
use crate::id::{make_id, CompositeKey};

// ---------------------------------------------------------------------------
// HadithRef
// ---------------------------------------------------------------------------

/// Identifies one hadith across any collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HadithRef {
    pub book: String,
    /// Section id as used by the API (`"1"`, `"2"`, ...).
    pub section: String,
    pub number: u64,
    pub lang: String,
}

impl HadithRef {
    pub fn new(
        book: impl Into<String>,
        section: impl Into<String>,
        number: u64,
        lang: impl Into<String>,
    ) -> Self {
        Self {
            book: book.into(),
            section: section.into(),
            number,
            lang: lang.into(),
        }
    }

    pub fn key(&self) -> CompositeKey {
        make_id(&self.book, &self.section, self.number, &self.lang)
    }
}

// ---------------------------------------------------------------------------
// Bookmark
// ---------------------------------------------------------------------------

/// A saved hadith with a snapshot of its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: CompositeKey,
    pub text: String,
    pub book: String,
    pub section: String,
    pub number: u64,
    pub lang: String,
}

impl Bookmark {
    pub fn from_ref(r: &HadithRef, text: impl Into<String>) -> Self {
        Self {
            id: r.key(),
            text: text.into(),
            book: r.book.clone(),
            section: r.section.clone(),
            number: r.number,
            lang: r.lang.clone(),
        }
    }

    pub fn hadith_ref(&self) -> HadithRef {
        HadithRef::new(&self.book, &self.section, self.number, &self.lang)
    }

    /// Everything a reader view needs to re-open this hadith.
    pub fn open_target(&self) -> OpenTarget {
        OpenTarget {
            section: SectionTarget::new(&self.book, &self.section, &self.lang),
            number: self.number,
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation targets
// ---------------------------------------------------------------------------

/// The section currently open in a reader view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionTarget {
    pub book: String,
    pub section: String,
    pub lang: String,
}

impl SectionTarget {
    pub fn new(book: impl Into<String>, section: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            section: section.into(),
            lang: lang.into(),
        }
    }

    pub fn hadith_ref(&self, number: u64) -> HadithRef {
        HadithRef::new(&self.book, &self.section, number, &self.lang)
    }
}

/// A section plus the hadith to scroll to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTarget {
    pub section: SectionTarget,
    pub number: u64,
}

impl OpenTarget {
    pub fn key(&self) -> CompositeKey {
        self.section.hadith_ref(self.number).key()
    }
}

// ---------------------------------------------------------------------------
// Remote payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HadithReference {
    #[serde(default)]
    pub book: u64,
    #[serde(default)]
    pub hadith: u64,
}

/// One hadith as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hadith {
    #[serde(alias = "hadithNumber")]
    pub hadithnumber: u64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub reference: HadithReference,
}

impl Hadith {
    /// Text handed to the platform share sheet / export file.
    pub fn share_message(&self, book: &str) -> String {
        format!("{}\n\n— {} #{}", self.text, book, self.hadithnumber)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMetadata {
    #[serde(default)]
    pub name: String,
    /// All sections of the book (`id -> title`); present on book-level payloads.
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
    /// The single section this payload covers (`id -> title`).
    #[serde(default)]
    pub section: BTreeMap<String, String>,
}

impl SectionMetadata {
    /// `(id, title)` of the covered section, if the payload names one.
    pub fn current_section(&self) -> Option<(&str, &str)> {
        self.section
            .iter()
            .next()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Full JSON document for one section (or one whole book).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPayload {
    #[serde(default)]
    pub metadata: SectionMetadata,
    #[serde(default)]
    pub hadiths: Vec<Hadith>,
}

/// Row of the book's table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub id: String,
    pub title: String,
}

/// Card shown on the home view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedHadith {
    pub section_label: String,
    pub hadith: Hadith,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub book: String,
    pub lang: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            book: DEFAULT_BOOK.to_string(),
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookmark_from_ref_carries_key_and_fields() {
        let r = HadithRef::new("bukhari", "1", 5, "eng");
        let b = Bookmark::from_ref(&r, "text");
        assert_eq!(b.id, "bukhari:1:5:eng");
        assert_eq!(b.hadith_ref(), r);
    }

    #[test]
    fn open_target_rebuilds_same_key() {
        let r = HadithRef::new("muslim", "3", 42, "ara");
        let b = Bookmark::from_ref(&r, "t");
        assert_eq!(b.open_target().key(), b.id);
    }

    #[test]
    fn bookmark_json_field_names() {
        let b = Bookmark::from_ref(&HadithRef::new("bukhari", "1", 5, "eng"), "x");
        let v = serde_json::to_value(&b).unwrap();
        for field in ["id", "text", "book", "section", "number", "lang"] {
            assert!(v.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn hadith_accepts_camel_case_number_and_ignores_extras() {
        let raw = r#"{"hadithNumber": 7, "arabicnumber": 7, "text": "t", "grades": [],
                      "reference": {"book": 1, "hadith": 7}}"#;
        let h: Hadith = serde_json::from_str(raw).unwrap();
        assert_eq!(h.hadithnumber, 7);
        assert_eq!(h.reference.hadith, 7);
    }

    #[test]
    fn section_payload_parses_api_shape() {
        let raw = r#"{
            "metadata": {"name": "Sahih al Bukhari",
                         "section": {"1": "Revelation"}},
            "hadiths": [{"hadithnumber": 1, "text": "a", "reference": {"book": 1, "hadith": 1}}]
        }"#;
        let p: SectionPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(p.metadata.current_section(), Some(("1", "Revelation")));
        assert_eq!(p.hadiths.len(), 1);
    }

    #[test]
    fn share_message_format() {
        let h = Hadith {
            hadithnumber: 5,
            text: "Actions are by intentions".to_string(),
            reference: HadithReference::default(),
        };
        assert_eq!(
            h.share_message("bukhari"),
            "Actions are by intentions\n\n— bukhari #5"
        );
    }

    #[test]
    fn settings_default() {
        let s = Settings::default();
        assert_eq!((s.book.as_str(), s.lang.as_str()), ("bukhari", "eng"));
    }
}
