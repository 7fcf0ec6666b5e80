//! HTTP transport integration tests.
//!
//! Starts an axum server standing in for the backend and drives it through
//! the real reqwest transport.

use std::sync::Arc;

use axum::extract::{Multipart, Path};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use scijournal::Site;
use scijournal::api::{FilePart, HttpTransport};
use scijournal::models::{Config, LocalizedText, NewsDraft, RecordId, TextInput};
use scijournal::session::{GuardDecision, SessionStore};
use scijournal::store::NewsForm;

const TOKEN: &str = "jwt-test";

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({"username": body["username"], "role": "admin", "token": TOKEN})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Неверный логин или пароль"})),
        )
    }
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if bearer(&headers) == Some(TOKEN) {
        (StatusCode::OK, Json(json!({"username": "editor", "role": "admin"})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "invalid token"})))
    }
}

async fn create_book(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if bearer(&headers).is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "no token"})));
    }
    (StatusCode::CREATED, Json(json!({"id": 7, "text": body["text"]})))
}

async fn delete_book(Path(id): Path<i64>) -> StatusCode {
    if id == 7 {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn create_news(mut multipart: Multipart) -> Json<Value> {
    let mut title = Value::Null;
    let mut date = String::new();
    let mut image = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        match name.as_str() {
            "title" => title = serde_json::from_slice(&bytes).unwrap(),
            "date" => date = String::from_utf8(bytes.to_vec()).unwrap(),
            "image" => image = file_name.zip(content_type),
            _ => {}
        }
    }
    let (image, mime) = image.unwrap_or_default();
    Json(json!({"id": 1, "title": title, "date": date, "image": format!("{image}|{mime}")}))
}

/// Bind to port 0 and return the actual address.
async fn start_server() -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/books", get(|| async { Json(json!([])) }).post(create_book))
        .route("/api/books/:id", delete(delete_book))
        .route("/api/news", post(create_news));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn site() -> Site {
    let mut config = Config::default();
    config.api.base_url = start_server().await;
    let transport = Arc::new(HttpTransport::new(&config.api).unwrap());
    Site::with_transport(config, transport, Arc::new(SessionStore::in_memory()))
}

#[tokio::test]
async fn login_then_guard_allows_admin() {
    let site = site().await;
    assert_eq!(site.guard.check().await, GuardDecision::RedirectToLogin);

    let user = site.auth.login("editor", "secret").await.unwrap();
    assert!(user.is_admin());
    assert_eq!(site.session().token().as_deref(), Some(TOKEN));

    match site.guard.check().await {
        GuardDecision::Allow(user) => assert_eq!(user.username, "editor"),
        other => panic!("expected admin access, got {other:?}"),
    }
}

#[tokio::test]
async fn bad_credentials_surface_backend_message() {
    let site = site().await;
    let err = site.auth.login("editor", "wrong").await.unwrap_err();
    assert!(err.to_string().contains("Неверный логин или пароль"));
    assert!(!site.session().is_authenticated());
}

#[tokio::test]
async fn rejected_token_is_dropped() {
    let site = site().await;
    site.session()
        .login(
            scijournal::models::User {
                username: "editor".into(),
                role: "admin".into(),
            },
            "stale",
        )
        .await
        .unwrap();

    assert_eq!(site.guard.check().await, GuardDecision::RedirectToLogin);
    assert!(site.session().token().is_none());
}

#[tokio::test]
async fn book_lifecycle_over_http() {
    let site = site().await;
    site.auth.login("editor", "secret").await.unwrap();

    site.books.load().await.unwrap();
    assert!(site.books.snapshot().is_empty_result());

    let book = site.books.create(TextInput::new("Book A")).await.unwrap();
    assert_eq!(book.id, RecordId::Num(7));
    assert_eq!(site.books.items()[0].text, "Book A");

    site.books.delete(&RecordId::Num(7)).await.unwrap();
    assert!(site.books.is_empty());

    let err = site.books.delete(&RecordId::Num(8)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(site.books.error().is_some());
}

#[tokio::test]
async fn news_multipart_reaches_server() {
    let site = site().await;
    let draft = NewsDraft {
        title: LocalizedText::new().with("ru", "Конференция"),
        description: LocalizedText::new(),
        date: "2024-10-01".into(),
    };
    let image = FilePart::new("poster.png", vec![0x89, b'P', b'N', b'G']);

    let created = site
        .news
        .create(NewsForm::new(draft, Some(image)))
        .await
        .unwrap();
    assert_eq!(created.title.ru(), "Конференция");
    assert_eq!(created.date.as_deref(), Some("2024-10-01"));
    assert_eq!(created.image.as_deref(), Some("poster.png|image/png"));
}
