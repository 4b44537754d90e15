//! Core repository and caching framework for the fieldsync portal.
//!
//! The portal re-exposes a third-party field-service CRM to customers. This
//! crate contains the generic machinery that keeps that glue correct:
//!
//! - [`context`]: the immutable per-call [`context::Context`] carrying the
//!   office scope, pagination, and requested relation paths.
//! - [`repository`]: the generic find/search operations over one mapped
//!   entity type, plus the caching decorator layered on top of them.
//! - [`relation`]: declared to-one/to-many relations and the batched
//!   loader that resolves them without per-row fan-out.
//! - [`cache`]: the tagged cache backend contract, deterministic key
//!   derivation, and the generic method-level caching layer.
//! - [`client`]: the narrow contract concrete upstream CRM clients
//!   implement.
//! - [`crm`]: the mapped portal models and the raw upstream record shapes
//!   they are built from.

pub mod cache;
pub mod client;
pub mod context;
pub mod crm;
pub mod entity;
pub mod relation;
pub mod repository;
