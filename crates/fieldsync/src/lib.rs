//! Portal-facing read layer over the field-service CRM.
//!
//! Wires the generic framework from `fieldsync_core` to the portal's
//! concrete entity types: a cache backend, an in-memory upstream for tests
//! and local development, and the per-entity repository builders.

pub mod cache;
pub mod repositories;
pub mod upstream;
