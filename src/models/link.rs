//! The shared capability-link shape implemented by both link variants.

use chrono::{DateTime, Utc};

/// Common accessors over share-links and upload-links.
///
/// Both record types carry the same describe-relevant fields; the gateway
/// projects and password-checks them through this trait so the per-kind code
/// is limited to what actually differs (transfer-operation mapping and the
/// public link route).
pub trait LinkRecord {
    fn token(&self) -> &str;
    fn owner(&self) -> &str;
    fn repo_id(&self) -> &str;
    fn path(&self) -> &str;
    fn password_hash(&self) -> Option<&str>;
    fn expires_at(&self) -> Option<DateTime<Utc>>;
    fn created_at(&self) -> DateTime<Utc>;
    fn view_cnt(&self) -> i64;

    /// Whether the link is password-protected.
    fn is_password_protected(&self) -> bool {
        self.password_hash().is_some()
    }

    /// Whether the link has expired.
    ///
    /// Evaluated against the current clock on every call; time advances
    /// between requests, so this must never be cached.
    fn is_expired(&self) -> bool {
        matches!(self.expires_at(), Some(expires) if expires <= Utc::now())
    }

    /// Display name of the link target, derived from its path.
    fn display_name(&self) -> String {
        display_name(self.path())
    }
}

/// Derive a display name from a repository path.
///
/// The root path `/` maps to itself; any other path has trailing separators
/// stripped and the final segment extracted. An empty path yields an empty
/// name.
pub fn display_name(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    if path == "/" {
        return "/".to_string();
    }
    let trimmed = path.trim_end_matches('/');
    trimmed
        .rsplit('/')
        .next()
        .unwrap_or(trimmed)
        .to_string()
}
