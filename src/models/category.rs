//! Article categories.

use serde::{Deserialize, Serialize};

use super::RecordId;
use super::record::lenient;

/// A category articles are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
}

/// Body of category create/update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInput {
    pub name: String,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
