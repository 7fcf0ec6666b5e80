//! Files offered to authors (templates, guidelines), kept in display order.

use serde::Serialize;

use super::{InsertAt, Payload, Resource, ResourceStore};
use crate::api::{Body, FilePart, Form, Method, endpoints};
use crate::error::{AppError, Result};
use crate::models::{AuthorFile, RecordId};

impl Resource for AuthorFile {
    const COLLECTION: &'static str = endpoints::AUTHOR_FILES;
    const NAME: &'static str = "author file";
    const INSERT_AT: InsertAt = InsertAt::Back;

    fn id(&self) -> &RecordId {
        &self.id
    }

    /// Ordered records first, by `order`; the rest keep backend order.
    fn arrange(items: &mut [Self]) {
        items.sort_by_key(|f| (f.order.is_none(), f.order));
    }
}

/// A new file with its title.
#[derive(Debug, Clone)]
pub struct AuthorFileUpload {
    pub title: String,
    pub file: Option<FilePart>,
}

impl Payload for AuthorFileUpload {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("file title must not be empty"));
        }
        Ok(())
    }

    fn into_body(self) -> Result<Body> {
        let form = Form::new()
            .text("title", self.title.trim())
            .file_opt("file", self.file);
        Ok(Body::Multipart(form))
    }
}

#[derive(Debug, Serialize)]
struct TitlePatch {
    title: String,
}

impl Payload for TitlePatch {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("file title must not be empty"));
        }
        Ok(())
    }

    fn into_body(self) -> Result<Body> {
        Body::json(&TitlePatch {
            title: self.title.trim().to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
struct OrderPatch {
    order: i64,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
}

impl ResourceStore<AuthorFile> {
    pub async fn add(&self, title: impl Into<String>, file: Option<FilePart>) -> Result<AuthorFile> {
        self.create(AuthorFileUpload {
            title: title.into(),
            file,
        })
        .await
    }

    /// Change a file's title (PATCH).
    pub async fn rename(&self, id: &RecordId, title: impl Into<String>) -> Result<AuthorFile> {
        self.update_with(Method::PATCH, id, TitlePatch { title: title.into() })
            .await
    }

    /// Move a file one place towards the top. No-op for the first file.
    pub async fn move_up(&self, id: &RecordId) -> Result<()> {
        self.shift(id, Direction::Up).await
    }

    /// Move a file one place towards the bottom. No-op for the last file.
    pub async fn move_down(&self, id: &RecordId) -> Result<()> {
        self.shift(id, Direction::Down).await
    }

    /// Swap with the neighbour, renumber every file to its position, and
    /// persist each changed `order`. The held list changes only when all
    /// patches succeed. If a patch fails after others went through, the list
    /// is reloaded so it mirrors the backend's partial renumbering.
    async fn shift(&self, id: &RecordId, direction: Direction) -> Result<()> {
        let mut items = self.items();
        let Some(index) = items.iter().position(|f| &f.id == id) else {
            return Err(self.fail(
                "reorder",
                AppError::validation(format!("no author file with id {id}")),
            ));
        };
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < items.len() => index + 1,
            _ => return Ok(()),
        };
        items.swap(index, target);

        let _loading = self.begin();
        let mut patched = 0;
        for (position, file) in items.iter_mut().enumerate() {
            let order = position as i64;
            if file.order == Some(order) {
                continue;
            }
            let body = Body::json(&OrderPatch { order })?;
            let path = endpoints::item(endpoints::AUTHOR_FILES, &file.id);
            if let Err(e) = self.client().execute(Method::PATCH, &path, body).await {
                if patched > 0 {
                    if let Err(reload) = self.fetch_all().await {
                        log::warn!("Reload after partial reorder failed: {}", reload);
                    }
                }
                return Err(self.fail("reorder", e));
            }
            file.order = Some(order);
            patched += 1;
        }
        log::info!("Moved author file {} to position {}", id, target);
        self.replace_items(items);
        Ok(())
    }
}
