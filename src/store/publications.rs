//! Publishing slider store.

use chrono::{SecondsFormat, Utc};

use super::{InsertAt, Payload, Resource, ResourceStore};
use crate::api::{Body, FilePart, Form, endpoints};
use crate::error::{AppError, Result};
use crate::models::{Publication, PublicationDraft, RecordId};

impl Resource for Publication {
    const COLLECTION: &'static str = endpoints::PUBLICATIONS;
    const NAME: &'static str = "publication";
    const INSERT_AT: InsertAt = InsertAt::Front;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// A slide to add. The date is stamped when the form is encoded.
#[derive(Debug, Clone)]
pub struct PublicationForm {
    pub draft: PublicationDraft,
    pub image: Option<FilePart>,
}

impl Payload for PublicationForm {
    fn validate(&self) -> Result<()> {
        if self.draft.title.is_blank() {
            return Err(AppError::validation("publication title must not be empty"));
        }
        Ok(())
    }

    fn into_body(self) -> Result<Body> {
        let form = Form::new()
            .json("title", &self.draft.title)?
            .json("description", &self.draft.description)?
            .text("date", Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
            .file_opt("image", self.image);
        Ok(Body::Multipart(form))
    }
}

impl ResourceStore<Publication> {
    pub async fn add(&self, draft: PublicationDraft, image: Option<FilePart>) -> Result<Publication> {
        self.create(PublicationForm { draft, image }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::api::mock::{self, MockTransport};
    use crate::models::LocalizedText;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_stamps_date() {
        let transport = MockTransport::new();
        transport.respond(
            Method::POST,
            "/api/publishingslider",
            201,
            json!({"id": "p1", "title": {"ru": "Слайд"}}),
        );
        let store: ResourceStore<Publication> = ResourceStore::new(mock::client(&transport));

        let draft = PublicationDraft {
            title: LocalizedText::new().with("ru", "Слайд"),
            ..PublicationDraft::default()
        };
        let added = store.add(draft, None).await.unwrap();
        assert_eq!(added.id, RecordId::from("p1"));

        let Body::Multipart(form) = transport.last_request().body else {
            panic!("expected multipart body");
        };
        let date = form.value("date").unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok());
        assert!(date.ends_with('Z'));
        assert_eq!(form.value("description"), Some("{}"));
    }

    #[tokio::test]
    async fn test_delete_removes_slide() {
        let transport = MockTransport::new();
        transport
            .respond(
                Method::GET,
                "/api/publishingslider",
                200,
                json!([{"id": 1}, {"id": 2}]),
            )
            .respond(Method::DELETE, "/api/publishingslider/1", 200, json!({}));
        let store: ResourceStore<Publication> = ResourceStore::new(mock::client(&transport));
        store.load().await.unwrap();

        store.delete(&RecordId::Num(1)).await.unwrap();
        assert_eq!(store.items().len(), 1);
        assert!(store.get(&RecordId::Num(1)).is_none());
    }
}
