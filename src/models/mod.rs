// src/models/mod.rs

//! Domain models mirrored from the backend.
//!
//! Records are flat, carry a backend-assigned [`RecordId`], and use
//! [`LocalizedText`] for every field that is edited per language.

mod article;
mod author_file;
mod category;
mod config;
mod contact;
mod entry;
mod journal;
mod locale;
mod news;
mod publication;
pub(crate) mod record;
mod user;

// Re-export all public types
pub use article::{Article, ArticleDraft};
pub use author_file::AuthorFile;
pub use category::{Category, CategoryInput};
pub use config::{API_BASE_URL_ENV, ApiConfig, Config, SessionConfig, SiteConfig};
pub use contact::{CONTACT_LOCALES, ContactInfo};
pub use entry::{Association, Book, TextInput};
pub use journal::{JOURNAL_LOCALES, Journal, JournalInput};
pub use locale::{Locale, LocalizedText};
pub use news::{NewsDraft, NewsItem};
pub use publication::{Publication, PublicationDraft};
pub use record::RecordId;
pub use user::{ADMIN_ROLE, Session, User};
