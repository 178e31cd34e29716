//! Request extractors for authentication, authorization and deduplication.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `ADMIN` role.
//! - [`rbac::RequireStaff`] -- Requires `STAFF` or `ADMIN`.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.
//! - [`idempotency::IdempotencyGuard`] -- Rejects replayed `Idempotency-Key`s.

pub mod auth;
pub mod idempotency;
pub mod rbac;
