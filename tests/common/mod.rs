//! Common test utilities and fixtures.
//!
//! Note: helpers carry #[allow(dead_code)] because each test file compiles
//! common/ separately.

use std::sync::Arc;

use chrono::Utc;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use link_gateway::models::share_link::{LinkKind, ShareLink};
use link_gateway::models::upload_link::UploadLink;
use link_gateway::routes::routes::routes;
use link_gateway::services::content_store::SqliteContentStore;
use link_gateway::services::link_gateway::{LinkGateway, UrlBuilder};
use link_gateway::services::link_store::LinkStore;
use link_gateway::services::transfer::{SqliteTransferTokens, TransferTokenIssuer};
use link_gateway::state::AppState;

#[allow(dead_code)]
pub const ADMIN_TOKEN: &str = "test-admin-token";
#[allow(dead_code)]
pub const SERVICE_URL: &str = "https://share.example.com";
#[allow(dead_code)]
pub const FILESERVER_URL: &str = "https://fs.example.com";

/// In-memory SQLite pool with the real schema applied.
///
/// A single connection is shared so every query sees the same database.
#[allow(dead_code)]
pub async fn test_pool() -> Arc<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite");

    let sql = include_str!("../../migrations/0001_init.sql");
    for stmt in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(stmt)
            .execute(&pool)
            .await
            .expect("migration statement failed");
    }

    Arc::new(pool)
}

/// Gateway over the shared pool, returning the concrete issuer as well so
/// tests can redeem the tokens it mints.
#[allow(dead_code)]
pub fn gateway(db: Arc<SqlitePool>) -> (LinkGateway, Arc<SqliteTransferTokens>) {
    let issuer = Arc::new(SqliteTransferTokens::new(db.clone()));
    let gw = gateway_with_issuer(db, issuer.clone());
    (gw, issuer)
}

/// Gateway wired to an arbitrary transfer-token issuer (mocks included).
#[allow(dead_code)]
pub fn gateway_with_issuer(
    db: Arc<SqlitePool>,
    issuer: Arc<dyn TransferTokenIssuer>,
) -> LinkGateway {
    LinkGateway::new(
        LinkStore::new(db.clone()),
        Arc::new(SqliteContentStore::new(db)),
        issuer,
        UrlBuilder::new(SERVICE_URL, FILESERVER_URL),
    )
}

/// Full router with auth middleware, as served in production.
#[allow(dead_code)]
pub fn app(db: Arc<SqlitePool>) -> axum::Router {
    let (gw, _) = gateway(db);
    routes(AppState::new(gw, ADMIN_TOKEN))
}

#[allow(dead_code)]
pub fn share_link(token: &str, repo_id: &str, path: &str, kind: LinkKind) -> ShareLink {
    ShareLink {
        token: token.to_string(),
        owner: "admin@test.com".to_string(),
        repo_id: repo_id.to_string(),
        path: path.to_string(),
        kind,
        password_hash: None,
        expires_at: None,
        created_at: Utc::now(),
        view_cnt: 0,
    }
}

#[allow(dead_code)]
pub fn upload_link(token: &str, repo_id: &str, path: &str) -> UploadLink {
    UploadLink {
        token: token.to_string(),
        owner: "admin@test.com".to_string(),
        repo_id: repo_id.to_string(),
        path: path.to_string(),
        password_hash: None,
        expires_at: None,
        created_at: Utc::now(),
        view_cnt: 0,
    }
}

#[allow(dead_code)]
pub async fn insert_share_link(db: &SqlitePool, link: &ShareLink) {
    sqlx::query(
        "INSERT INTO share_links (token, owner, repo_id, path, kind, password_hash,
                                  expires_at, created_at, view_cnt)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&link.token)
    .bind(&link.owner)
    .bind(&link.repo_id)
    .bind(&link.path)
    .bind(link.kind)
    .bind(&link.password_hash)
    .bind(link.expires_at)
    .bind(link.created_at)
    .bind(link.view_cnt)
    .execute(db)
    .await
    .expect("insert share link");
}

#[allow(dead_code)]
pub async fn insert_upload_link(db: &SqlitePool, link: &UploadLink) {
    sqlx::query(
        "INSERT INTO upload_links (token, owner, repo_id, path, password_hash,
                                   expires_at, created_at, view_cnt)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&link.token)
    .bind(&link.owner)
    .bind(&link.repo_id)
    .bind(&link.path)
    .bind(&link.password_hash)
    .bind(link.expires_at)
    .bind(link.created_at)
    .bind(link.view_cnt)
    .execute(db)
    .await
    .expect("insert upload link");
}

#[allow(dead_code)]
pub async fn seed_repo(db: &SqlitePool, repo_id: &str, name: &str) {
    sqlx::query("INSERT INTO repos (id, name) VALUES (?, ?)")
        .bind(repo_id)
        .bind(name)
        .execute(db)
        .await
        .expect("insert repo");
}

#[allow(dead_code)]
pub async fn seed_dirent(db: &SqlitePool, repo_id: &str, path: &str, obj_id: &str, is_dir: bool) {
    sqlx::query("INSERT INTO dirents (repo_id, path, obj_id, is_dir) VALUES (?, ?, ?, ?)")
        .bind(repo_id)
        .bind(path)
        .bind(obj_id)
        .bind(is_dir)
        .execute(db)
        .await
        .expect("insert dirent");
}

/// Pull the transfer token out of a `{fileserver}/files/{token}/{name}` URL.
#[allow(dead_code)]
pub fn transfer_token_from_url(url: &str) -> String {
    let segments: Vec<&str> = url.split('/').collect();
    assert!(segments.len() >= 2, "unexpected transfer url: {url}");
    segments[segments.len() - 2].to_string()
}
