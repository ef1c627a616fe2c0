//! Upload-link record: write access to a directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::link::LinkRecord;

/// A capability token granting write access to a directory without caller
/// authentication.
///
/// Same shape as a share-link minus the kind (the target is always a
/// directory). `expires_at` carries the same semantics but is not part of
/// the legacy description projection.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct UploadLink {
    /// Opaque unique token, generated at creation, immutable.
    pub token: String,

    /// Identity of the user who created the link.
    pub owner: String,

    /// Repository holding the target directory.
    pub repo_id: String,

    /// Path of the target directory within the repository.
    pub path: String,

    /// Argon2id hash, present iff the link is password-protected.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Absolute expiry timestamp; absent means the link never expires.
    pub expires_at: Option<DateTime<Utc>>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// How often the link has been viewed.
    pub view_cnt: i64,
}

impl LinkRecord for UploadLink {
    fn token(&self) -> &str {
        &self.token
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn repo_id(&self) -> &str {
        &self.repo_id
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn view_cnt(&self) -> i64 {
        self.view_cnt
    }
}
