//! Share-link record: read access to a file or directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::link::LinkRecord;

/// What a share-link points at, fixed at creation time.
///
/// Determines which transfer operations are semantically valid for the link
/// and which public route its shareable URL uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    File,
    Dir,
}

/// A capability token granting read access to a file or directory without
/// caller authentication.
///
/// Created by the non-admin sharing flows; the gateway only ever reads these
/// records. `view_cnt` is incremented elsewhere and read-only here.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct ShareLink {
    /// Opaque unique token, generated at creation, immutable.
    pub token: String,

    /// Identity of the user who created the link.
    pub owner: String,

    /// Repository holding the target object.
    pub repo_id: String,

    /// Path of the target within the repository; a file or a directory.
    pub path: String,

    /// Whether the link targets a file or a directory.
    pub kind: LinkKind,

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

impl ShareLink {
    pub fn is_dir(&self) -> bool {
        self.kind == LinkKind::Dir
    }
}

impl LinkRecord for ShareLink {
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
