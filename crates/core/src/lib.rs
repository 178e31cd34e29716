//! Domain logic for the school content-management backend.
//!
//! Everything in this crate is pure: no database access, no filesystem, no
//! HTTP. The `db` and `api` crates build on these types and rules.

pub mod content;
pub mod error;
pub mod roles;
pub mod sanitize;
pub mod school_info;
pub mod types;
pub mod upload;
pub mod validation;
