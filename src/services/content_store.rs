//! Content-store collaborator: the versioned repository the links point into.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentStoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("content store unavailable: {0}")]
    Unavailable(String),
}

/// Repository metadata as far as the gateway cares about it.
#[derive(Debug, Clone, FromRow)]
pub struct RepoInfo {
    pub id: String,
    pub name: String,
}

/// Lookup oracle over the content store.
///
/// A link's `repo_id` + `path` may reference an object deleted after the
/// link was created, so every lookup can legitimately return `None`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Repository metadata, `None` if the repository no longer exists.
    async fn get_repo(&self, repo_id: &str) -> Result<Option<RepoInfo>, ContentStoreError>;

    /// Object id of the *file* at `path`, `None` if absent or a directory.
    async fn get_file_id_by_path(
        &self,
        repo_id: &str,
        path: &str,
    ) -> Result<Option<String>, ContentStoreError>;

    /// Object id of the *directory* at `path`, `None` if absent or a file.
    async fn get_dir_id_by_path(
        &self,
        repo_id: &str,
        path: &str,
    ) -> Result<Option<String>, ContentStoreError>;
}

/// Default implementation over the `repos` / `dirents` metadata tables
/// maintained by the storage tier.
#[derive(Clone)]
pub struct SqliteContentStore {
    db: Arc<SqlitePool>,
}

impl SqliteContentStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    async fn get_obj_id(
        &self,
        repo_id: &str,
        path: &str,
        is_dir: bool,
    ) -> Result<Option<String>, ContentStoreError> {
        let obj_id = sqlx::query_scalar::<_, String>(
            "SELECT obj_id FROM dirents WHERE repo_id = ? AND path = ? AND is_dir = ?",
        )
        .bind(repo_id)
        .bind(path)
        .bind(is_dir)
        .fetch_optional(&*self.db)
        .await?;
        Ok(obj_id)
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn get_repo(&self, repo_id: &str) -> Result<Option<RepoInfo>, ContentStoreError> {
        let repo = sqlx::query_as::<_, RepoInfo>("SELECT id, name FROM repos WHERE id = ?")
            .bind(repo_id)
            .fetch_optional(&*self.db)
            .await?;
        Ok(repo)
    }

    async fn get_file_id_by_path(
        &self,
        repo_id: &str,
        path: &str,
    ) -> Result<Option<String>, ContentStoreError> {
        self.get_obj_id(repo_id, path, false).await
    }

    async fn get_dir_id_by_path(
        &self,
        repo_id: &str,
        path: &str,
    ) -> Result<Option<String>, ContentStoreError> {
        self.get_obj_id(repo_id, path, true).await
    }
}
