//! News items.

use serde::{Deserialize, Serialize};

use super::record::lenient;
use super::{LocalizedText, RecordId};

/// A news entry shown on the front page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: RecordId,

    #[serde(default)]
    pub title: LocalizedText,

    #[serde(default)]
    pub description: LocalizedText,

    /// Publication date as entered by the editor
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,

    /// Stored image file name
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image: Option<String>,
}

/// Text fields of the news form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsDraft {
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub date: String,
}
