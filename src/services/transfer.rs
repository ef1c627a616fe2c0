//! Transfer-token issuance against the file-transfer tier.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;

/// How long an issued transfer token stays redeemable.
const TRANSFER_TOKEN_TTL_SECS: i64 = 3600;

/// Number of random bytes behind an issued token.
const TRANSFER_TOKEN_BYTES: usize = 24;

/// The operation a transfer token is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransferOp {
    View,
    Download,
    Upload,
}

impl fmt::Display for TransferOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOp::View => write!(f, "view"),
            TransferOp::Download => write!(f, "download"),
            TransferOp::Upload => write!(f, "upload"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransferError {
    /// The transfer tier declined to issue a token.
    #[error("transfer token refused: {0}")]
    Refused(String),
    /// Redemption of a token that is unknown, expired, or already consumed.
    #[error("transfer token `{0}` is invalid or consumed")]
    InvalidToken(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// What a transfer token grants once redeemed by the transfer tier.
#[derive(Debug, Clone, FromRow)]
pub struct TransferGrant {
    pub repo_id: String,
    pub obj_id: String,
    pub op: TransferOp,
    pub one_time: bool,
}

/// Issues short-lived, operation-scoped transfer tokens.
///
/// Issuance is atomic from the gateway's point of view; a refusal is a
/// legitimate outcome the caller degrades on, never retries.
#[async_trait]
pub trait TransferTokenIssuer: Send + Sync {
    async fn issue(
        &self,
        repo_id: &str,
        obj_id: &str,
        op: TransferOp,
        one_time: bool,
    ) -> Result<String, TransferError>;
}

/// Default issuer persisting tokens for the transfer tier to redeem.
#[derive(Clone)]
pub struct SqliteTransferTokens {
    db: Arc<SqlitePool>,
}

#[derive(FromRow)]
struct TransferTokenRow {
    repo_id: String,
    obj_id: String,
    op: TransferOp,
    one_time: bool,
    redeemed: bool,
    expires_at: DateTime<Utc>,
}

impl SqliteTransferTokens {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    fn generate_token() -> String {
        let mut bytes = [0u8; TRANSFER_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Redeem a token on behalf of the transfer tier.
    ///
    /// One-time tokens are consumed by the first successful redemption;
    /// a second redemption fails with `InvalidToken`.
    pub async fn redeem(&self, token: &str) -> Result<TransferGrant, TransferError> {
        let row = sqlx::query_as::<_, TransferTokenRow>(
            "SELECT repo_id, obj_id, op, one_time, redeemed, expires_at
             FROM transfer_tokens WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&*self.db)
        .await?
        .ok_or_else(|| TransferError::InvalidToken(token.to_string()))?;

        if row.redeemed || row.expires_at <= Utc::now() {
            return Err(TransferError::InvalidToken(token.to_string()));
        }

        if row.one_time {
            let result = sqlx::query(
                "UPDATE transfer_tokens SET redeemed = 1 WHERE token = ? AND redeemed = 0",
            )
            .bind(token)
            .execute(&*self.db)
            .await?;

            if result.rows_affected() == 0 {
                return Err(TransferError::InvalidToken(token.to_string()));
            }
        }

        Ok(TransferGrant {
            repo_id: row.repo_id,
            obj_id: row.obj_id,
            op: row.op,
            one_time: row.one_time,
        })
    }
}

#[async_trait]
impl TransferTokenIssuer for SqliteTransferTokens {
    async fn issue(
        &self,
        repo_id: &str,
        obj_id: &str,
        op: TransferOp,
        one_time: bool,
    ) -> Result<String, TransferError> {
        let token = Self::generate_token();
        let expires_at = Utc::now() + Duration::seconds(TRANSFER_TOKEN_TTL_SECS);

        sqlx::query(
            "INSERT INTO transfer_tokens (token, repo_id, obj_id, op, one_time, redeemed, expires_at)
             VALUES (?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(&token)
        .bind(repo_id)
        .bind(obj_id)
        .bind(op)
        .bind(one_time)
        .bind(expires_at)
        .execute(&*self.db)
        .await?;

        Ok(token)
    }
}
