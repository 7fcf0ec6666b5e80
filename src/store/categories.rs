//! Categories store.

use super::{InsertAt, Payload, Resource};
use crate::api::{Body, endpoints};
use crate::error::{AppError, Result};
use crate::models::{Category, CategoryInput, RecordId};

impl Resource for Category {
    const COLLECTION: &'static str = endpoints::CATEGORIES;
    const NAME: &'static str = "category";
    const INSERT_AT: InsertAt = InsertAt::Back;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Payload for CategoryInput {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("category name must not be empty"));
        }
        Ok(())
    }

    fn into_body(self) -> Result<Body> {
        Body::json(&CategoryInput::new(self.name.trim()))
    }
}
