//! Session store persisted to a per-origin file.
//!
//! The file plays the part of browser session storage: it is keyed by the
//! backend origin, so a token issued by one deployment is never sent to
//! another.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Session, User};
use crate::utils::origin;

/// Current identity and token, mirrored to disk when a path is set.
#[derive(Debug, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// A session that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the session file for `base_url` under `dir`, restoring any
    /// session saved there.
    pub async fn open(dir: impl AsRef<Path>, base_url: &str) -> Result<Self> {
        let path = dir.as_ref().join(Self::file_name(base_url));
        let current = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Session>(&bytes) {
                Ok(session) => {
                    log::debug!(
                        "Restored session for {} from {}",
                        session.user.username,
                        path.display()
                    );
                    Some(session)
                }
                Err(e) => {
                    log::warn!("Discarding unreadable session file {}: {}", path.display(), e);
                    remove_if_exists(&path).await?;
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(AppError::Io(e)),
        };
        Ok(Self {
            path: Some(path),
            current: RwLock::new(current),
        })
    }

    /// Session file name for a backend: a hex SHA-256 prefix of its origin.
    pub fn file_name(base_url: &str) -> String {
        let scope = origin(base_url).unwrap_or_else(|| base_url.trim().to_string());
        let digest = Sha256::digest(scope.as_bytes());
        format!("session-{}.json", &hex::encode(digest)[..16])
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Store the identity and token in memory and on disk.
    pub async fn login(&self, user: User, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(AppError::validation("cannot log in with an empty token"));
        }
        let session = Session { user, token };
        if let Some(path) = &self.path {
            write_atomic(path, &serde_json::to_vec_pretty(&session)?).await?;
        }
        log::info!("Logged in as {}", session.user.username);
        *self.write() = Some(session);
        Ok(())
    }

    /// Forget the identity and token, in memory and on disk.
    pub async fn logout(&self) -> Result<()> {
        let previous = self.write().take();
        if let Some(path) = &self.path {
            remove_if_exists(path).await?;
        }
        if let Some(session) = previous {
            log::info!("Logged out {}", session.user.username);
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Write bytes atomically (write to temp, then rename).
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("tmp");
    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User {
            username: "editor".into(),
            role: "admin".into(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_and_restores() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path(), "http://localhost:5000").await.unwrap();
        assert!(!store.is_authenticated());

        store.login(admin(), "tok-1").await.unwrap();
        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert!(store.path().unwrap().exists());

        let reopened = SessionStore::open(dir.path(), "http://localhost:5000/").await.unwrap();
        assert_eq!(reopened.user(), Some(admin()));
        assert_eq!(reopened.token().as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path(), "http://localhost:5000").await.unwrap();
        store.login(admin(), "tok-1").await.unwrap();
        store.logout().await.unwrap();

        assert!(store.current().is_none());
        assert!(!store.path().unwrap().exists());
        // Logging out twice is harmless.
        store.logout().await.unwrap();
    }

    #[tokio::test]
    async fn test_sessions_are_scoped_by_origin() {
        let dir = tempfile::tempdir().unwrap();
        let a = SessionStore::open(dir.path(), "https://a.example.kg").await.unwrap();
        a.login(admin(), "tok-a").await.unwrap();

        let b = SessionStore::open(dir.path(), "https://b.example.kg").await.unwrap();
        assert!(b.token().is_none());
        assert_ne!(
            SessionStore::file_name("https://a.example.kg/api"),
            SessionStore::file_name("https://b.example.kg/api")
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SessionStore::file_name("http://localhost:5000"));
        std::fs::write(&path, b"{not json").unwrap();

        let store = SessionStore::open(dir.path(), "http://localhost:5000").await.unwrap();
        assert!(store.current().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let store = SessionStore::in_memory();
        let err = store.login(admin(), " ").await.unwrap_err();
        assert!(err.is_validation());
        assert!(!store.is_authenticated());
    }
}
