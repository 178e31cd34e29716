//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod achievement;
pub mod event;
pub mod news;
pub mod ppdb;
pub mod school_activity;
pub mod school_info;
pub mod teacher;
pub mod testimony;
pub mod user;
