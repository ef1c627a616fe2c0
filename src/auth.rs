//! Authentication and authorization middleware.
//!
//! The gateway operations themselves are free of transport and
//! authorization concerns; this layer authenticates the caller and enforces
//! the administrator gate before any handler runs.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use sha2::{Digest, Sha256};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Maximum length for client-provided trace IDs.
const MAX_TRACE_ID_LEN: usize = 64;

/// Trace ID for request correlation.
#[derive(Clone, Debug)]
pub struct TraceId(pub String);

impl TraceId {
    /// Generate a new random trace ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a trace ID from a client-provided value, truncated and
    /// filtered to printable ASCII for log safety.
    pub fn from_client(value: &str) -> Self {
        let sanitized: String = value
            .chars()
            .take(MAX_TRACE_ID_LEN)
            .filter(|c| c.is_ascii_graphic())
            .collect();

        if sanitized.is_empty() {
            Self::new()
        } else {
            Self(sanitized)
        }
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extract bearer token from the Authorization header.
/// Per RFC 6750, the "Bearer" scheme is case-insensitive.
fn extract_bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            if v.len() >= 7 && v[..7].eq_ignore_ascii_case("bearer ") {
                Some(&v[7..])
            } else {
                None
            }
        })
}

/// Extract trace ID from the x-trace-id header or generate a new one.
fn extract_or_generate_trace_id(req: &Request) -> TraceId {
    req.headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(TraceId::from_client)
        .unwrap_or_default()
}

/// SHA-256 hex digest of a credential, for comparison without retaining the
/// plaintext.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Administrator gate applied to every admin route.
///
/// Missing credentials are a 401; presented credentials that do not match
/// the configured administrator token are a 403.
pub async fn admin_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let trace_id = extract_or_generate_trace_id(&req);
    req.extensions_mut().insert(trace_id.clone());

    let token = extract_bearer_token(&req)
        .ok_or_else(|| AppError::unauthorized("missing bearer credentials"))?;

    if hash_token(token) != state.admin_token_sha256 {
        warn!(%trace_id, "rejected non-admin credentials on admin route");
        return Err(AppError::forbidden("administrator role required"));
    }

    Ok(next.run(req).await)
}
