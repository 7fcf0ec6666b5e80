//! Resource stores: one in-memory collection per backend entity plus the
//! operations that keep it in step with the REST API.
//!
//! Every store is an explicit value handed to the views that use it. Nothing
//! loads on construction; hosts call [`ResourceStore::load`] when a view
//! initialises.

mod articles;
mod author_files;
mod categories;
mod contact;
mod entries;
mod journals;
mod news;
mod publications;
mod resource;
mod state;

use serde::de::DeserializeOwned;

use crate::api::Body;
use crate::error::Result;
use crate::models::RecordId;

pub use articles::ArticleForm;
pub use author_files::AuthorFileUpload;
pub use contact::{ContactForm, ContactState, ContactStore};
pub use news::NewsForm;
pub use publications::PublicationForm;
pub use resource::ResourceStore;
pub use state::{LoadState, StoreState};

pub type JournalStore = ResourceStore<crate::models::Journal>;
pub type ArticleStore = ResourceStore<crate::models::Article>;
pub type CategoryStore = ResourceStore<crate::models::Category>;
pub type NewsStore = ResourceStore<crate::models::NewsItem>;
pub type BookStore = ResourceStore<crate::models::Book>;
pub type AssociationStore = ResourceStore<crate::models::Association>;
pub type AuthorFileStore = ResourceStore<crate::models::AuthorFile>;
pub type PublicationStore = ResourceStore<crate::models::Publication>;

/// Where `create` puts the returned record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    Front,
    Back,
}

/// A backend entity held by a [`ResourceStore`].
pub trait Resource: Clone + DeserializeOwned + Send + Sync + 'static {
    /// Collection endpoint, e.g. `/api/books`.
    const COLLECTION: &'static str;
    /// Singular name used in log and error messages.
    const NAME: &'static str;
    const INSERT_AT: InsertAt;

    fn id(&self) -> &RecordId;

    /// Applied to every record received from the backend.
    fn normalize(self) -> Self {
        self
    }

    /// Applied to the collection after a full fetch.
    fn arrange(_items: &mut [Self]) {}
}

/// Something a store can send as a create or update body.
pub trait Payload {
    /// Client-side checks; failing here means no request is issued.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn into_body(self) -> Result<Body>;
}
