//! Core data models for the link gateway.
//!
//! Share-links and upload-links are two variants of the same capability-link
//! shape. Both map to database rows via `sqlx::FromRow`, serialize via
//! `serde`, and expose their shared fields through the `LinkRecord` trait.

pub mod link;
pub mod share_link;
pub mod upload_link;
