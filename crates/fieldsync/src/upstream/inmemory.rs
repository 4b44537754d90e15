//! In-memory upstream backend for tests and local development.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use fieldsync_core::client::{AttrValue, Result, SearchCriteria, UpstreamClient};
use fieldsync_core::context::Context;
use fieldsync_core::crm::{
    AppointmentRecord, CustomerRecord, ServiceTypeRecord, SubscriptionRecord,
};
use fieldsync_core::entity::{EntityId, OfficeId};

/// Raw record shape the in-memory upstream can serve.
///
/// The vendor encodes ids as strings; accessors parse on demand and treat
/// unparseable values as absent, the same way the real API skips them.
pub trait StoredRecord: Clone + Send + Sync + 'static {
    fn id(&self) -> Option<EntityId>;
    fn office(&self) -> Option<OfficeId>;
    /// The record's value for one upstream search attribute.
    fn attr(&self, attribute: &str) -> Option<AttrValue>;
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

impl StoredRecord for CustomerRecord {
    fn id(&self) -> Option<EntityId> {
        parse_int(&self.customer_id)
    }

    fn office(&self) -> Option<OfficeId> {
        parse_int(&self.office_id)
    }

    fn attr(&self, attribute: &str) -> Option<AttrValue> {
        match attribute {
            "customerID" => self.id().map(AttrValue::Int),
            _ => None,
        }
    }
}

impl StoredRecord for SubscriptionRecord {
    fn id(&self) -> Option<EntityId> {
        parse_int(&self.subscription_id)
    }

    fn office(&self) -> Option<OfficeId> {
        parse_int(&self.office_id)
    }

    fn attr(&self, attribute: &str) -> Option<AttrValue> {
        match attribute {
            "customerID" => parse_int(&self.customer_id).map(AttrValue::Int),
            "serviceID" => self.service_id.as_deref().and_then(parse_int).map(AttrValue::Int),
            _ => None,
        }
    }
}

impl StoredRecord for ServiceTypeRecord {
    fn id(&self) -> Option<EntityId> {
        parse_int(&self.type_id)
    }

    fn office(&self) -> Option<OfficeId> {
        parse_int(&self.office_id)
    }

    fn attr(&self, _attribute: &str) -> Option<AttrValue> {
        None
    }
}

impl StoredRecord for AppointmentRecord {
    fn id(&self) -> Option<EntityId> {
        parse_int(&self.appointment_id)
    }

    fn office(&self) -> Option<OfficeId> {
        parse_int(&self.office_id)
    }

    fn attr(&self, attribute: &str) -> Option<AttrValue> {
        match attribute {
            "customerID" => parse_int(&self.customer_id).map(AttrValue::Int),
            "subscriptionID" => self
                .subscription_id
                .as_deref()
                .and_then(parse_int)
                .map(AttrValue::Int),
            _ => None,
        }
    }
}

/// In-memory upstream serving one record type from a vector.
///
/// Applies office scope, search filters and pagination the way the real
/// API does. Every call bumps a counter, so tests can assert exactly how
/// many upstream round trips an operation took.
pub struct InMemoryUpstream<R> {
    records: RwLock<Vec<R>>,
    fetch_calls: AtomicUsize,
    fetch_many_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl<R: StoredRecord> InMemoryUpstream<R> {
    /// Creates an empty upstream.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            fetch_calls: AtomicUsize::new(0),
            fetch_many_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
        }
    }

    /// Adds one record.
    pub async fn insert(&self, record: R) {
        self.records.write().await.push(record);
    }

    /// Adds many records.
    pub async fn extend(&self, records: impl IntoIterator<Item = R>) {
        self.records.write().await.extend(records);
    }

    /// Number of `fetch` calls served so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_many` calls served so far.
    pub fn fetch_many_calls(&self) -> usize {
        self.fetch_many_calls.load(Ordering::SeqCst)
    }

    /// Number of `search` calls served so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Total upstream round trips served so far.
    pub fn total_calls(&self) -> usize {
        self.fetch_calls() + self.fetch_many_calls() + self.search_calls()
    }

    fn in_scope(ctx: &Context, record: &R) -> bool {
        match ctx.office() {
            None => true,
            Some(office) => record.office() == Some(office),
        }
    }
}

impl<R: StoredRecord> Default for InMemoryUpstream<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: StoredRecord> UpstreamClient for InMemoryUpstream<R> {
    type Record = R;

    async fn fetch(&self, ctx: &Context, id: EntityId) -> Result<Option<R>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.id() == Some(id) && Self::in_scope(ctx, r))
            .cloned())
    }

    async fn fetch_many(&self, ctx: &Context, ids: &[EntityId]) -> Result<Vec<R>> {
        self.fetch_many_calls.fetch_add(1, Ordering::SeqCst);
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| {
                r.id().is_some_and(|id| ids.contains(&id)) && Self::in_scope(ctx, r)
            })
            .cloned()
            .collect())
    }

    async fn search(&self, ctx: &Context, criteria: &SearchCriteria) -> Result<Vec<R>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let records = self.records.read().await;
        let matches = records.iter().filter(|r| {
            Self::in_scope(ctx, r)
                && criteria.iter().all(|(attribute, values)| {
                    r.attr(attribute).is_some_and(|v| values.contains(&v))
                })
        });

        Ok(match ctx.pagination() {
            Some(p) => {
                let skip = (p.page.saturating_sub(1) as usize) * p.per_page as usize;
                matches.skip(skip).take(p.per_page as usize).cloned().collect()
            }
            None => matches.cloned().collect(),
        })
    }
}

/// One in-memory upstream per entity type, bundled for wiring.
#[derive(Default)]
pub struct InMemoryUpstreams {
    pub customers: Arc<InMemoryUpstream<CustomerRecord>>,
    pub subscriptions: Arc<InMemoryUpstream<SubscriptionRecord>>,
    pub service_types: Arc<InMemoryUpstream<ServiceTypeRecord>>,
    pub appointments: Arc<InMemoryUpstream<AppointmentRecord>>,
}

impl InMemoryUpstreams {
    /// Creates empty upstreams for all entity types.
    pub fn new() -> Self {
        Self::default()
    }
}
