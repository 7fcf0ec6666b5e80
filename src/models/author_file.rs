//! Downloadable files in the "for authors" section.

use serde::{Deserialize, Serialize};

use super::RecordId;
use super::record::lenient;

/// A file offered to authors (templates, guidelines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorFile {
    pub id: RecordId,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,

    #[serde(default, alias = "url", alias = "filePath", deserialize_with = "lenient::opt_string")]
    pub file_url: Option<String>,

    /// Position in the list; lower comes first
    #[serde(default, alias = "position", deserialize_with = "lenient::opt_i64")]
    pub order: Option<i64>,
}
