//! Publisher slider items.

use serde::{Deserialize, Serialize};

use super::record::lenient;
use super::{LocalizedText, RecordId};

/// A slide in the publisher carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: RecordId,

    #[serde(default)]
    pub title: LocalizedText,

    #[serde(default)]
    pub description: LocalizedText,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub image: Option<String>,
}

/// Text fields of the slider form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicationDraft {
    pub title: LocalizedText,
    pub description: LocalizedText,
}
