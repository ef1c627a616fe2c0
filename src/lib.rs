//! Administrative gateway over a file-sharing service's capability links.
//!
//! Share-links (read access to a file or directory) and upload-links (write
//! access to a directory) are created by the non-admin sharing flows; this
//! service lets an administrator inspect them, verify their passwords, and
//! obtain transfer URLs for their targets without the creator's session.

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
