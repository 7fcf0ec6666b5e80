//! Journals store.

use super::{InsertAt, Payload, Resource, ResourceStore};
use crate::api::{Body, endpoints};
use crate::error::{AppError, Result};
use crate::models::{Journal, JournalInput, RecordId};

impl Resource for Journal {
    const COLLECTION: &'static str = endpoints::JOURNALS;
    const NAME: &'static str = "journal";
    const INSERT_AT: InsertAt = InsertAt::Back;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn normalize(self) -> Self {
        Journal::normalize(self)
    }
}

impl Payload for JournalInput {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("journal name must not be empty"));
        }
        Ok(())
    }

    fn into_body(mut self) -> Result<Body> {
        self.name = self.name.trim().to_string();
        self.abbreviation = self.abbreviation.trim().to_string();
        Body::json(&self)
    }
}

impl ResourceStore<Journal> {
    /// Load a micro-site's journal by its abbreviation and select it.
    pub async fn fetch_by_abbreviation(&self, abbr: &str) -> Result<Journal> {
        if abbr.trim().is_empty() {
            return Err(self.fail("fetch", AppError::validation("abbreviation is empty")));
        }
        self.fetch_selected(&endpoints::journal_by_abbreviation(abbr))
            .await
    }

    pub fn find_by_abbreviation(&self, abbr: &str) -> Option<Journal> {
        self.find(|j| j.matches_abbreviation(abbr))
    }
}
