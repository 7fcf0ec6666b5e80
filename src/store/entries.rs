//! Books and associations: single-text entries listed newest first.

use super::{InsertAt, Payload, Resource};
use crate::api::{Body, endpoints};
use crate::error::{AppError, Result};
use crate::models::{Association, Book, RecordId, TextInput};

impl Resource for Book {
    const COLLECTION: &'static str = endpoints::BOOKS;
    const NAME: &'static str = "book";
    const INSERT_AT: InsertAt = InsertAt::Front;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Resource for Association {
    const COLLECTION: &'static str = endpoints::ASSOCIATIONS;
    const NAME: &'static str = "association";
    const INSERT_AT: InsertAt = InsertAt::Front;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Payload for TextInput {
    fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(AppError::validation("text must not be empty"));
        }
        Ok(())
    }

    fn into_body(self) -> Result<Body> {
        Body::json(&TextInput::new(self.text.trim()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::Method;
    use crate::api::mock::{self, MockTransport};
    use crate::store::ResourceStore;
    use serde_json::json;

    fn books(transport: &Arc<MockTransport>) -> ResourceStore<Book> {
        ResourceStore::new(mock::client(transport))
    }

    #[tokio::test]
    async fn test_book_lifecycle() {
        let transport = MockTransport::new();
        transport
            .respond(Method::GET, "/api/books", 200, json!([{"id": 3, "text": "Older"}]))
            .respond(Method::POST, "/api/books", 201, json!({"id": 7, "text": "Book A"}))
            .respond(Method::DELETE, "/api/books/7", 204, json!(null));
        let store = books(&transport);
        store.load().await.unwrap();

        let created = store.create(TextInput::new("Book A")).await.unwrap();
        assert_eq!(created.id, RecordId::Num(7));
        assert_eq!(store.items()[0].text, "Book A");
        assert_eq!(store.len(), 2);
        assert_eq!(
            transport.last_request().body,
            Body::Json(json!({"text": "Book A"}))
        );

        store.delete(&RecordId::Num(7)).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].text, "Older");
    }

    #[tokio::test]
    async fn test_create_then_delete_leaves_empty() {
        let transport = MockTransport::new();
        transport
            .respond(Method::POST, "/api/books", 201, json!({"id": 7, "text": "Book A"}))
            .respond(Method::DELETE, "/api/books/7", 200, json!({"message": "ok"}));
        let store = books(&transport);

        store.create(TextInput::new("Book A")).await.unwrap();
        assert_eq!(store.len(), 1);
        store.delete(&RecordId::Num(7)).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_locally() {
        let transport = MockTransport::new();
        let store: ResourceStore<Association> = ResourceStore::new(mock::client(&transport));

        let err = store.create(TextInput::new("   ")).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(transport.request_count(), 0);
        assert!(store.error().unwrap().contains("association"));
    }

    #[tokio::test]
    async fn test_failed_update_keeps_item() {
        let transport = MockTransport::new();
        transport
            .respond(Method::GET, "/api/associations", 200, json!([{"id": 1, "text": "IEEE"}]))
            .respond(Method::PUT, "/api/associations/1", 500, json!({"message": "db down"}));
        let store: ResourceStore<Association> = ResourceStore::new(mock::client(&transport));
        store.load().await.unwrap();

        let err = store
            .update(&RecordId::Num(1), TextInput::new("ACM"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(store.items()[0].text, "IEEE");
        assert!(store.error().unwrap().contains("db down"));
        assert!(!store.is_loading());
    }
}
