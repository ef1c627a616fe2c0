//! Shared application state carried by the router.

use crate::auth::hash_token;
use crate::services::link_gateway::LinkGateway;

/// State cloned into every handler and the auth layer.
#[derive(Clone)]
pub struct AppState {
    pub gateway: LinkGateway,
    /// SHA-256 hex digest of the administrator bearer token; the plaintext
    /// is never retained.
    pub admin_token_sha256: String,
}

impl AppState {
    pub fn new(gateway: LinkGateway, admin_token: &str) -> Self {
        Self {
            gateway,
            admin_token_sha256: hash_token(admin_token),
        }
    }
}
