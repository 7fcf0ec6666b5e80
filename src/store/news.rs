//! News store.

use super::{InsertAt, Payload, Resource};
use crate::api::{Body, FilePart, Form, endpoints};
use crate::error::{AppError, Result};
use crate::models::{NewsDraft, NewsItem, RecordId};

impl Resource for NewsItem {
    const COLLECTION: &'static str = endpoints::NEWS;
    const NAME: &'static str = "news item";
    const INSERT_AT: InsertAt = InsertAt::Front;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// News form plus an optional cover image.
#[derive(Debug, Clone)]
pub struct NewsForm {
    pub draft: NewsDraft,
    pub image: Option<FilePart>,
}

impl NewsForm {
    pub fn new(draft: NewsDraft, image: Option<FilePart>) -> Self {
        Self { draft, image }
    }
}

impl Payload for NewsForm {
    fn validate(&self) -> Result<()> {
        if self.draft.title.is_blank() {
            return Err(AppError::validation("news title must not be empty"));
        }
        Ok(())
    }

    fn into_body(self) -> Result<Body> {
        let form = Form::new()
            .json("title", &self.draft.title)?
            .json("description", &self.draft.description)?
            .text("date", self.draft.date)
            .file_opt("image", self.image);
        Ok(Body::Multipart(form))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::Method;
    use crate::api::mock::{self, MockTransport};
    use crate::models::{Locale, LocalizedText};
    use crate::store::ResourceStore;
    use serde_json::json;

    fn store(transport: &Arc<MockTransport>) -> ResourceStore<NewsItem> {
        ResourceStore::new(mock::client(transport))
    }

    fn draft(title: &str) -> NewsDraft {
        NewsDraft {
            title: LocalizedText::new().with("ru", title),
            description: LocalizedText::new().with("ru", "Текст"),
            date: "2024-05-01".into(),
        }
    }

    #[tokio::test]
    async fn test_create_goes_to_front() {
        let transport = MockTransport::new();
        transport
            .respond(Method::GET, "/api/news", 200, json!([{"id": 1, "title": {"ru": "Старая"}}]))
            .respond(
                Method::POST,
                "/api/news",
                201,
                json!({"id": 2, "title": {"ru": "Новая"}, "image": "n.jpg"}),
            );
        let news = store(&transport);
        news.load().await.unwrap();

        let image = FilePart::new("n.jpg", vec![0xff, 0xd8]);
        news.create(NewsForm::new(draft("Новая"), Some(image)))
            .await
            .unwrap();

        let items = news.items();
        assert_eq!(items[0].title.get(Locale::En), "Новая");
        assert_eq!(items[1].id, RecordId::Num(1));

        let Body::Multipart(form) = transport.last_request().body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.value("title"), Some(r#"{"ru":"Новая"}"#));
        assert_eq!(form.value("date"), Some("2024-05-01"));
        assert_eq!(form.files("image").len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let transport = MockTransport::new();
        transport
            .respond(
                Method::GET,
                "/api/news",
                200,
                json!([{"id": 1, "title": {"ru": "A"}}, {"id": 2, "title": {"ru": "B"}}]),
            )
            .respond(Method::PUT, "/api/news/2", 200, json!({"id": 2, "title": {"ru": "B2"}}));
        let news = store(&transport);
        news.load().await.unwrap();

        news.update(&RecordId::Num(2), NewsForm::new(draft("B2"), None))
            .await
            .unwrap();
        let items = news.items();
        assert_eq!(items[0].title.ru(), "A");
        assert_eq!(items[1].title.ru(), "B2");
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let transport = MockTransport::new();
        let news = store(&transport);
        let err = news.create(NewsForm::new(draft(" "), None)).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(transport.request_count(), 0);
    }
}
