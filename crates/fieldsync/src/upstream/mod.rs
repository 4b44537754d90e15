//! Upstream CRM backends.

mod inmemory;

pub use inmemory::{InMemoryUpstream, InMemoryUpstreams, StoredRecord};
