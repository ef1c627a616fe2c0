//! Defines routes for the admin link API.
//!
//! ## Structure
//! - **Admin endpoints** (administrator bearer token required)
//!   - `GET  /api/v2.1/admin/share-links/{token}` — describe a share-link
//!   - `GET  /api/v2.1/admin/share-links/{token}/transfer-urls` — mint view/download URLs
//!   - `POST /api/v2.1/admin/share-links/{token}/check-password` — verify a share-link password
//!   - `GET  /api/v2.1/admin/upload-links/{token}` — describe an upload-link
//!   - `GET  /api/v2.1/admin/upload-links/{token}/transfer-url` — mint the upload URL
//!   - `POST /api/v2.1/admin/upload-links/{token}/check-password` — verify an upload-link password
//!
//! - **Operational endpoints** (unauthenticated)
//!   - `GET /healthz`, `GET /readyz`

use crate::{
    auth::admin_gate,
    handlers::{
        health_handlers::{healthz, readyz},
        link_handlers::{
            check_share_link_password, check_upload_link_password, get_share_link,
            get_share_link_transfer_urls, get_upload_link, get_upload_link_transfer_url,
        },
    },
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Build the router with the admin routes behind the administrator gate.
///
/// The gate runs before any handler, so the handlers themselves stay free
/// of authorization concerns.
pub fn routes(state: AppState) -> Router {
    let admin = Router::new()
        .route("/api/v2.1/admin/share-links/{token}", get(get_share_link))
        .route(
            "/api/v2.1/admin/share-links/{token}/transfer-urls",
            get(get_share_link_transfer_urls),
        )
        .route(
            "/api/v2.1/admin/share-links/{token}/check-password",
            post(check_share_link_password),
        )
        .route("/api/v2.1/admin/upload-links/{token}", get(get_upload_link))
        .route(
            "/api/v2.1/admin/upload-links/{token}/transfer-url",
            get(get_upload_link_transfer_url),
        )
        .route(
            "/api/v2.1/admin/upload-links/{token}/check-password",
            post(check_upload_link_password),
        )
        .layer(middleware::from_fn_with_state(state.clone(), admin_gate));

    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(admin)
        .with_state(state)
}
