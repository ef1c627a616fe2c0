//! HTTP handlers for the admin link endpoints.
//!
//! Thin request/response plumbing; all domain logic lives in `LinkGateway`.
//! Every handler here runs behind the administrator gate.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::link_gateway::{LinkInfo, ShareLinkInfo, ShareTransferUrls, UploadTransferUrl};
use crate::state::AppState;

/// Body accepted by the check-password endpoints.
#[derive(Debug, Deserialize)]
pub struct CheckPasswordReq {
    #[serde(default)]
    pub password: Option<String>,
}

/// Response of a successful password check.
#[derive(Debug, Serialize)]
pub struct CheckPasswordResp {
    pub success: bool,
}

/// GET `/api/v2.1/admin/share-links/{token}` — describe a share-link.
pub async fn get_share_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ShareLinkInfo>, AppError> {
    let info = state.gateway.describe_share_link(&token).await?;
    Ok(Json(info))
}

/// GET `/api/v2.1/admin/share-links/{token}/transfer-urls` — mint view and
/// download URLs for the link's file target.
pub async fn get_share_link_transfer_urls(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ShareTransferUrls>, AppError> {
    let urls = state.gateway.mint_share_link_urls(&token).await?;
    Ok(Json(urls))
}

/// POST `/api/v2.1/admin/share-links/{token}/check-password`
pub async fn check_share_link_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<CheckPasswordReq>,
) -> Result<Json<CheckPasswordResp>, AppError> {
    state
        .gateway
        .verify_share_link_password(&token, req.password.as_deref())
        .await?;
    Ok(Json(CheckPasswordResp { success: true }))
}

/// GET `/api/v2.1/admin/upload-links/{token}` — describe an upload-link.
pub async fn get_upload_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<LinkInfo>, AppError> {
    let info = state.gateway.describe_upload_link(&token).await?;
    Ok(Json(info))
}

/// GET `/api/v2.1/admin/upload-links/{token}/transfer-url` — mint the
/// one-time upload URL for the link's directory target.
pub async fn get_upload_link_transfer_url(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<UploadTransferUrl>, AppError> {
    let url = state.gateway.mint_upload_link_url(&token).await?;
    Ok(Json(url))
}

/// POST `/api/v2.1/admin/upload-links/{token}/check-password`
pub async fn check_upload_link_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<CheckPasswordReq>,
) -> Result<Json<CheckPasswordResp>, AppError> {
    state
        .gateway
        .verify_upload_link_password(&token, req.password.as_deref())
        .await?;
    Ok(Json(CheckPasswordResp { success: true }))
}
