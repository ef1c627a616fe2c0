//! Read-only lookups against the link store.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::models::{share_link::ShareLink, upload_link::UploadLink};

/// Lookup-by-token access to the durable link records.
///
/// This is the single entry point every gateway operation starts from. The
/// store is read-only from the gateway's perspective; link creation and
/// deletion happen in the non-admin sharing flows.
#[derive(Clone)]
pub struct LinkStore {
    /// Shared SQLite connection pool holding the link tables.
    pub db: Arc<SqlitePool>,
}

impl LinkStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Fetch a share-link by its token, `None` if absent.
    pub async fn find_share_link(&self, token: &str) -> Result<Option<ShareLink>, sqlx::Error> {
        sqlx::query_as::<_, ShareLink>(
            "SELECT token, owner, repo_id, path, kind, password_hash, expires_at,
                    created_at, view_cnt
             FROM share_links WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&*self.db)
        .await
    }

    /// Fetch an upload-link by its token, `None` if absent.
    pub async fn find_upload_link(&self, token: &str) -> Result<Option<UploadLink>, sqlx::Error> {
        sqlx::query_as::<_, UploadLink>(
            "SELECT token, owner, repo_id, path, password_hash, expires_at,
                    created_at, view_cnt
             FROM upload_links WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&*self.db)
        .await
    }
}
