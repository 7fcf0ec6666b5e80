//! Journal records.

use serde::{Deserialize, Serialize};

use super::record::lenient;
use super::{LocalizedText, RecordId};

/// Locale keys journal texts are edited under.
pub const JOURNAL_LOCALES: [&str; 3] = ["ru", "en", "kg"];

/// A journal hosted on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    pub id: RecordId,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,

    /// Short code used in micro-site URLs (e.g. `nntiik`)
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub abbreviation: String,

    #[serde(default)]
    pub about: LocalizedText,

    #[serde(default)]
    pub editorial_board: LocalizedText,

    #[serde(default)]
    pub indexing: LocalizedText,

    /// Older records spell the editorial board key in lowercase.
    #[serde(default, rename = "editorialboard", skip_serializing)]
    legacy_editorial_board: Option<LocalizedText>,
}

impl Journal {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            abbreviation: abbreviation.into(),
            about: LocalizedText::blank(&JOURNAL_LOCALES),
            editorial_board: LocalizedText::blank(&JOURNAL_LOCALES),
            indexing: LocalizedText::blank(&JOURNAL_LOCALES),
            legacy_editorial_board: None,
        }
    }

    /// Fill in absent sections so views never see a missing map.
    pub fn normalize(mut self) -> Self {
        if let Some(legacy) = self.legacy_editorial_board.take() {
            if self.editorial_board.is_blank() {
                self.editorial_board = legacy;
            }
        }
        for section in [&mut self.about, &mut self.editorial_board, &mut self.indexing] {
            for key in JOURNAL_LOCALES {
                if section.raw(key).is_none() {
                    section.set(key, "");
                }
            }
        }
        self
    }

    pub fn matches_abbreviation(&self, abbr: &str) -> bool {
        self.abbreviation.eq_ignore_ascii_case(abbr.trim())
    }
}

/// Journal fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalInput {
    pub name: String,
    pub abbreviation: String,
    pub about: LocalizedText,
    pub editorial_board: LocalizedText,
    pub indexing: LocalizedText,
}

impl JournalInput {
    /// A new journal: just a name and abbreviation, empty sections.
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            about: LocalizedText::blank(&JOURNAL_LOCALES),
            editorial_board: LocalizedText::blank(&JOURNAL_LOCALES),
            indexing: LocalizedText::blank(&JOURNAL_LOCALES),
        }
    }
}

impl From<&Journal> for JournalInput {
    fn from(journal: &Journal) -> Self {
        Self {
            name: journal.name.clone(),
            abbreviation: journal.abbreviation.clone(),
            about: journal.about.clone(),
            editorial_board: journal.editorial_board.clone(),
            indexing: journal.indexing.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Locale;

    #[test]
    fn test_normalize_fills_sections() {
        let journal: Journal =
            serde_json::from_str(r#"{"id":1,"name":"Наука","abbreviation":"nntiik"}"#).unwrap();
        let journal = journal.normalize();
        for key in JOURNAL_LOCALES {
            assert_eq!(journal.about.raw(key), Some(""));
            assert_eq!(journal.indexing.raw(key), Some(""));
        }
    }

    #[test]
    fn test_normalize_accepts_lowercase_editorial_board() {
        let journal: Journal = serde_json::from_str(
            r#"{"id":"a1","name":"J","abbreviation":"ivk","editorialboard":{"ru":"Редколлегия"}}"#,
        )
        .unwrap();
        let journal = journal.normalize();
        assert_eq!(journal.editorial_board.get(Locale::En), "Редколлегия");
    }

    #[test]
    fn test_camel_case_key_wins() {
        let journal: Journal = serde_json::from_str(
            r#"{"id":1,"name":"J","editorialBoard":{"ru":"new"},"editorialboard":{"ru":"old"}}"#,
        )
        .unwrap();
        assert_eq!(journal.normalize().editorial_board.ru(), "new");
    }

    #[test]
    fn test_matches_abbreviation() {
        let journal = Journal::new(1, "J", "NNTIIK");
        assert!(journal.matches_abbreviation(" nntiik "));
        assert!(!journal.matches_abbreviation("ivk"));
    }

    #[test]
    fn test_input_serializes_camel_case() {
        let value = serde_json::to_value(JournalInput::new("J", "j")).unwrap();
        assert!(value.get("editorialBoard").is_some());
        assert_eq!(value["about"]["kg"], "");
    }
}
