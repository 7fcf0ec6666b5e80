//! Free-text listings: books and associations.
//!
//! Both carry a single markdown-ish body that may embed `[label](url)` links.

use serde::{Deserialize, Serialize};

use super::RecordId;
use super::record::lenient;

/// A book listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub text: String,
}

/// An association listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub text: String,
}

/// Body of book/association create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextInput {
    pub text: String,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
