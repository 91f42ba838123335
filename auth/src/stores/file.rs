//! File-backed token store.
//!
//! The session and the user flags live in one JSON document:
//!
//! ```json
//! {
//!   "accessToken": "…",
//!   "refreshToken": "…",
//!   "userEmail": "a@b.com",
//!   "profileUpdated": false
//! }
//! ```
//!
//! # Atomicity
//!
//! Every write goes to a sibling `*.tmp` file that is then renamed over the
//! document, so a crash mid-write leaves the previous document intact.
//! Read-modify-write sequences within one process are serialized by a mutex.

use crate::error::{Result, StoreError};
use crate::providers::TokenStore;
use booking_gateway_core::{Session, UserFlags};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// On-disk shape of the stored document.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_email: Option<String>,
    #[serde(default)]
    profile_updated: bool,
}

impl StoredDocument {
    fn session(&self) -> Option<Session> {
        let access_token = self.access_token.as_deref()?;
        let session = Session::new(
            access_token,
            self.refresh_token.clone().unwrap_or_default(),
            self.user_email.clone().unwrap_or_default(),
        );
        session.is_usable().then_some(session)
    }

    fn set_session(&mut self, session: &Session) {
        self.access_token = Some(session.access_token.clone());
        self.refresh_token = Some(session.refresh_token.clone());
        self.user_email = Some(session.user_email.clone());
    }

    const fn flags(&self) -> UserFlags {
        UserFlags {
            profile_updated: self.profile_updated,
        }
    }
}

/// Token store persisting to a JSON file.
///
/// # Thread Safety
///
/// This type is `Clone`; clones share the same write lock.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileTokenStore {
    /// Create a store backed by `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Location of the session document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_document(&self) -> Result<StoredDocument> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredDocument::default()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(StoredDocument::default());
        }
        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Session document is corrupt");
            StoreError::Corrupt(e.to_string())
        })
    }

    async fn write_document(&self, document: &StoredDocument) -> Result<()> {
        let bytes =
            serde_json::to_vec_pretty(document).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    async fn save(&self, session: &Session) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        // A corrupt document is replaced rather than blocking a fresh login.
        let mut document = match self.read_document().await {
            Ok(document) => document,
            Err(StoreError::Corrupt(_)) => StoredDocument::default(),
            Err(e) => return Err(e),
        };
        document.set_session(session);
        self.write_document(&document).await?;
        tracing::debug!(user = %session.user_email, "Session saved");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.read_document().await?.session())
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn flags(&self) -> Result<UserFlags> {
        Ok(self.read_document().await?.flags())
    }

    async fn set_flags(&self, flags: UserFlags) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        document.profile_updated = flags.profile_updated;
        self.write_document(&document).await
    }
}
