//! LinkGateway — the admin-facing operations over capability links.
//!
//! Three idempotent read/verify operations per link kind: describe a link,
//! mint transfer URLs for its target, and verify its password. The gateway
//! resolves tokens through the link store, consults the content store for
//! live object ids, and redeems grants against the transfer tier; it owns no
//! mutable state of its own between calls.

use std::sync::Arc;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::models::{
    link::LinkRecord,
    share_link::{LinkKind, ShareLink},
    upload_link::UploadLink,
};
use crate::services::{
    content_store::{ContentStore, ContentStoreError},
    link_store::LinkStore,
    password::{self, PasswordError},
    transfer::{TransferError, TransferOp, TransferTokenIssuer},
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("link `{0}` not found")]
    LinkNotFound(String),
    #[error("target of link `{0}` not found in the content store")]
    TargetNotFound(String),
    #[error("link `{0}` is not password protected")]
    NotPasswordProtected(String),
    #[error("password required")]
    PasswordMissing,
    #[error("password is not correct")]
    WrongPassword,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    ContentStore(#[from] ContentStoreError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Description fields shared by both link kinds.
///
/// Timestamps are ISO-8601 text, empty string when not set; `repo_name`
/// degrades to empty string when the repository no longer exists. Callers
/// rely on empty string, never null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkInfo {
    pub owner: String,
    pub repo_id: String,
    pub repo_name: String,
    pub path: String,
    pub obj_name: String,
    pub token: String,
    pub link: String,
    pub view_cnt: i64,
    pub created_at: String,
}

/// Full description of a share-link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkInfo {
    #[serde(flatten)]
    pub info: LinkInfo,
    pub is_dir: bool,
    pub expires_at: String,
    pub is_expired: bool,
}

/// Transfer URLs minted for a share-link target.
///
/// Either URL may be empty when the transfer tier refused that one
/// issuance; the sibling purpose can still succeed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareTransferUrls {
    pub view: String,
    pub download: String,
}

/// Transfer URL minted for an upload-link target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadTransferUrl {
    pub upload: String,
}

/// Builds the deterministic, non-secret URL patterns handed to callers.
#[derive(Clone, Debug)]
pub struct UrlBuilder {
    service_url: String,
    fileserver_url: String,
}

impl UrlBuilder {
    pub fn new(service_url: &str, fileserver_url: &str) -> Self {
        Self {
            service_url: service_url.trim_end_matches('/').to_string(),
            fileserver_url: fileserver_url.trim_end_matches('/').to_string(),
        }
    }

    /// Public shareable URL for a share-link, routed by kind.
    pub fn shared_link(&self, token: &str, kind: LinkKind) -> String {
        match kind {
            LinkKind::Dir => format!("{}/d/{}/", self.service_url, token),
            LinkKind::File => format!("{}/f/{}/", self.service_url, token),
        }
    }

    /// Public shareable URL for an upload-link.
    pub fn shared_upload_link(&self, token: &str) -> String {
        format!("{}/u/d/{}", self.service_url, token)
    }

    /// Fetch URL for a view/download transfer token plus display filename.
    pub fn file_get_url(&self, transfer_token: &str, filename: &str) -> String {
        format!("{}/files/{}/{}", self.fileserver_url, transfer_token, filename)
    }

    /// Upload URL; redeemed through the upload-api route with the original
    /// link token, not the transfer token.
    pub fn file_upload_url(&self, link_token: &str) -> String {
        format!("{}/upload-api/{}", self.fileserver_url, link_token)
    }
}

/// The admin link gateway over the link store, content store, and transfer
/// tier.
#[derive(Clone)]
pub struct LinkGateway {
    /// Link store lookups; the pool behind it also serves readiness probes.
    pub links: LinkStore,
    content: Arc<dyn ContentStore>,
    transfer: Arc<dyn TransferTokenIssuer>,
    urls: UrlBuilder,
}

impl LinkGateway {
    pub fn new(
        links: LinkStore,
        content: Arc<dyn ContentStore>,
        transfer: Arc<dyn TransferTokenIssuer>,
        urls: UrlBuilder,
    ) -> Self {
        Self {
            links,
            content,
            transfer,
            urls,
        }
    }

    /// Resolve a share-link token or fail uniformly with `LinkNotFound`.
    async fn resolve_share_link(&self, token: &str) -> GatewayResult<ShareLink> {
        self.links
            .find_share_link(token)
            .await?
            .ok_or_else(|| GatewayError::LinkNotFound(token.to_string()))
    }

    /// Resolve an upload-link token or fail uniformly with `LinkNotFound`.
    async fn resolve_upload_link(&self, token: &str) -> GatewayResult<UploadLink> {
        self.links
            .find_upload_link(token)
            .await?
            .ok_or_else(|| GatewayError::LinkNotFound(token.to_string()))
    }

    /// Repository display name, empty string when the repository is gone.
    ///
    /// A link can legitimately outlive its repository's visible metadata, so
    /// lookup failures degrade rather than failing the whole description.
    async fn repo_name_or_empty(&self, repo_id: &str, token: &str) -> String {
        match self.content.get_repo(repo_id).await {
            Ok(Some(repo)) => repo.name,
            Ok(None) => String::new(),
            Err(err) => {
                error!(token, repo_id, error = %err, "repo metadata lookup failed");
                String::new()
            }
        }
    }

    /// Shared read projection over either link kind.
    async fn project(&self, link: &(dyn LinkRecord + Sync), url: String) -> LinkInfo {
        LinkInfo {
            owner: link.owner().to_string(),
            repo_id: link.repo_id().to_string(),
            repo_name: self.repo_name_or_empty(link.repo_id(), link.token()).await,
            path: link.path().to_string(),
            obj_name: link.display_name(),
            token: link.token().to_string(),
            link: url,
            view_cnt: link.view_cnt(),
            created_at: format_timestamp(Some(link.created_at())),
        }
    }

    /// Describe a share-link; pure read, no side effects.
    pub async fn describe_share_link(&self, token: &str) -> GatewayResult<ShareLinkInfo> {
        let link = self.resolve_share_link(token).await?;
        let url = self.urls.shared_link(&link.token, link.kind);
        let info = self.project(&link, url).await;

        Ok(ShareLinkInfo {
            info,
            is_dir: link.is_dir(),
            expires_at: format_timestamp(link.expires_at),
            is_expired: link.is_expired(),
        })
    }

    /// Describe an upload-link; legacy projection without expiry fields.
    pub async fn describe_upload_link(&self, token: &str) -> GatewayResult<LinkInfo> {
        let link = self.resolve_upload_link(token).await?;
        let url = self.urls.shared_upload_link(&link.token);
        Ok(self.project(&link, url).await)
    }

    /// Mint view and download URLs for a share-link's file target.
    ///
    /// `view` is reusable; `download` is one-time. A refused issuance
    /// degrades that one URL to empty instead of failing the call, and is
    /// never retried here.
    pub async fn mint_share_link_urls(&self, token: &str) -> GatewayResult<ShareTransferUrls> {
        let link = self.resolve_share_link(token).await?;

        let obj_id = self
            .content
            .get_file_id_by_path(&link.repo_id, &link.path)
            .await?
            .ok_or_else(|| GatewayError::TargetNotFound(token.to_string()))?;

        let obj_name = link.display_name();

        let view = match self
            .transfer
            .issue(&link.repo_id, &obj_id, TransferOp::View, false)
            .await
        {
            Ok(transfer_token) => self.urls.file_get_url(&transfer_token, &obj_name),
            Err(TransferError::Refused(reason)) => {
                error!(token, op = "view", reason = %reason, "transfer token refused");
                String::new()
            }
            Err(err) => return Err(err.into()),
        };

        let download = match self
            .transfer
            .issue(&link.repo_id, &obj_id, TransferOp::Download, true)
            .await
        {
            Ok(transfer_token) => self.urls.file_get_url(&transfer_token, &obj_name),
            Err(TransferError::Refused(reason)) => {
                error!(token, op = "download", reason = %reason, "transfer token refused");
                String::new()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(ShareTransferUrls { view, download })
    }

    /// Mint the upload URL for an upload-link's directory target.
    ///
    /// The upload grant is one-time; the returned URL embeds the original
    /// link token, since uploads are redeemed through their own endpoint
    /// namespace.
    pub async fn mint_upload_link_url(&self, token: &str) -> GatewayResult<UploadTransferUrl> {
        let link = self.resolve_upload_link(token).await?;

        let dir_id = self
            .content
            .get_dir_id_by_path(&link.repo_id, &link.path)
            .await?
            .ok_or_else(|| GatewayError::TargetNotFound(token.to_string()))?;

        let upload = match self
            .transfer
            .issue(&link.repo_id, &dir_id, TransferOp::Upload, true)
            .await
        {
            Ok(_transfer_token) => self.urls.file_upload_url(&link.token),
            Err(TransferError::Refused(reason)) => {
                error!(token, op = "upload", reason = %reason, "transfer token refused");
                String::new()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(UploadTransferUrl { upload })
    }

    /// Verify a share-link password.
    pub async fn verify_share_link_password(
        &self,
        token: &str,
        submitted: Option<&str>,
    ) -> GatewayResult<()> {
        let link = self.resolve_share_link(token).await?;
        check_password(&link, submitted)
    }

    /// Verify an upload-link password.
    pub async fn verify_upload_link_password(
        &self,
        token: &str,
        submitted: Option<&str>,
    ) -> GatewayResult<()> {
        let link = self.resolve_upload_link(token).await?;
        check_password(&link, submitted)
    }
}

/// Stateless password check shared by both link kinds.
///
/// Verifying against an unprotected link is a caller error, reported
/// distinctly from a wrong password.
fn check_password(link: &dyn LinkRecord, submitted: Option<&str>) -> GatewayResult<()> {
    let Some(hash) = link.password_hash() else {
        return Err(GatewayError::NotPasswordProtected(link.token().to_string()));
    };

    let submitted = submitted
        .filter(|p| !p.is_empty())
        .ok_or(GatewayError::PasswordMissing)?;

    if password::verify_password(submitted, hash)? {
        Ok(())
    } else {
        Err(GatewayError::WrongPassword)
    }
}

/// ISO-8601 text for a timestamp, empty string when not set.
fn format_timestamp(ts: Option<chrono::DateTime<chrono::Utc>>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}
