//! Transport seam between the API client and the wire.
//!
//! Requests and multipart forms are plain data so that alternative
//! transports (in-memory backends for tests) can inspect them.

use std::path::Path;

use async_trait::async_trait;
use mime::Mime;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

pub use reqwest::Method;

/// A request against an absolute API path such as `/api/books/7`.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Body,
    pub bearer: Option<String>,
}

/// Request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

impl Body {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Body::Json(serde_json::to_value(value)?))
    }
}

/// Raw response: status plus body bytes.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Human-readable failure reason: the backend's `message` or `error`
    /// field, else the body text, else the status reason.
    pub fn message(&self) -> String {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&self.body) {
            for key in ["message", "error"] {
                if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                    return msg.to_string();
                }
            }
        }
        let text = String::from_utf8_lossy(&self.body).trim().to_string();
        if !text.is_empty() && text.len() <= 200 {
            return text;
        }
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("request failed")
            .to_string()
    }

    /// Turn a non-success status into an error.
    pub fn error_for_status(self) -> Result<Self> {
        match self.status {
            s if (200..300).contains(&s) => Ok(self),
            401 => Err(AppError::Unauthorized(self.message())),
            s => Err(AppError::api(s, self.message())),
        }
    }
}

/// Multipart form: ordered text fields and file parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, file: FilePart },
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a field whose value is the JSON encoding of `value`.
    pub fn json<T: Serialize + ?Sized>(self, name: impl Into<String>, value: &T) -> Result<Self> {
        Ok(self.text(name, serde_json::to_string(value)?))
    }

    pub fn file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.parts.push(Part::File {
            name: name.into(),
            file,
        });
        self
    }

    pub fn file_opt(self, name: impl Into<String>, file: Option<FilePart>) -> Self {
        match file {
            Some(file) => self.file(name, file),
            None => self,
        }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// First text value under `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            Part::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// File parts under `name`.
    pub fn files(&self, name: &str) -> Vec<&FilePart> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::File { name: n, file } if n == name => Some(file),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn into_reqwest(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                Part::Text { name, value } => form.text(name, value),
                Part::File { name, file } => {
                    let part = reqwest::multipart::Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(file.mime.as_ref())?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

/// An uploaded file: PDF for articles, images for news and contacts.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub mime: Mime,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Build a part, guessing the content type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let mime = guess_mime(&file_name);
        Self {
            file_name,
            mime,
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::validation(format!("{} is not a file", path.display())))?;
        Ok(Self::new(file_name, bytes))
    }
}

fn guess_mime(file_name: &str) -> Mime {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => mime::APPLICATION_PDF,
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "txt" => mime::TEXT_PLAIN,
        "webp" => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        "doc" => "application/msword"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Sends requests to the backend.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request. Non-success statuses are returned, not raised.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_prefers_backend_field() {
        let resp = ApiResponse::new(400, r#"{"message":"Неверный пароль"}"#);
        assert_eq!(resp.message(), "Неверный пароль");

        let resp = ApiResponse::new(500, r#"{"error":"db down"}"#);
        assert_eq!(resp.message(), "db down");
    }

    #[test]
    fn test_message_falls_back_to_reason() {
        assert_eq!(ApiResponse::new(404, "").message(), "Not Found");
        assert_eq!(ApiResponse::new(502, "bad gateway").message(), "bad gateway");
    }

    #[test]
    fn test_error_for_status() {
        assert!(ApiResponse::new(201, "{}").error_for_status().is_ok());
        assert!(matches!(
            ApiResponse::new(401, "").error_for_status(),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            ApiResponse::new(500, "").error_for_status(),
            Err(AppError::Api { status: 500, .. })
        ));
    }

    #[test]
    fn test_form_lookup() {
        let form = Form::new()
            .text("date", "2025-01-01")
            .json("title", &serde_json::json!({"ru": "Новость"}))
            .unwrap()
            .file_opt("image", Some(FilePart::new("cover.JPG", vec![1, 2, 3])))
            .file_opt("extra", None);
        assert_eq!(form.value("date"), Some("2025-01-01"));
        assert_eq!(form.value("title"), Some(r#"{"ru":"Новость"}"#));
        let images = form.files("image");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].mime, mime::IMAGE_JPEG);
        assert!(form.files("extra").is_empty());
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime("paper.pdf"), mime::APPLICATION_PDF);
        assert_eq!(guess_mime("noext"), mime::APPLICATION_OCTET_STREAM);
        assert_eq!(guess_mime("a.webp").essence_str(), "image/webp");
    }
}
