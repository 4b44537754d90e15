//! Caching behavior of the decorated repository graph.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{appointment, customer, subscription};
use fieldsync::cache::MemoryCache;
use fieldsync::repositories::{customers, Repositories};
use fieldsync::upstream::{InMemoryUpstream, InMemoryUpstreams};
use fieldsync_core::cache::Cache;
use fieldsync_core::client::{AttrValue, SearchCriteria};
use fieldsync_core::context::Context;
use fieldsync_core::repository::{CachePolicy, CachedRepository, Repository};

const OFFICE: i64 = 1;

fn ctx() -> Context {
    Context::new().with_office(OFFICE)
}

fn policy() -> CachePolicy {
    CachePolicy::new(Duration::from_secs(300))
}

fn cache() -> Arc<MemoryCache> {
    Arc::new(MemoryCache::new(1000))
}

#[tokio::test]
async fn test_repeat_find_is_served_from_cache() {
    let upstreams = InMemoryUpstreams::new();
    upstreams.customers.insert(customer(1, OFFICE)).await;
    let repos = Repositories::wire_cached(&upstreams, cache(), policy()).unwrap();

    let first = repos.customers.find(&ctx(), 1).await.unwrap();
    let second = repos.customers.find(&ctx(), 1).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(upstreams.customers.fetch_calls(), 1);
}

#[tokio::test]
async fn test_cache_entry_is_independent_of_requested_relations() {
    let upstreams = InMemoryUpstreams::new();
    upstreams.customers.insert(customer(1, OFFICE)).await;
    upstreams
        .subscriptions
        .insert(subscription(10, OFFICE, 1, None))
        .await;
    upstreams
        .appointments
        .insert(appointment(100, OFFICE, 1, Some(10)))
        .await;
    let repos = Repositories::wire_cached(&upstreams, cache(), policy()).unwrap();

    let with_subs = ctx().with_related(["subscriptions"]).unwrap();
    let with_appts = ctx().with_related(["appointments"]).unwrap();

    let first = repos.customers.find(&with_subs, 1).await.unwrap();
    let second = repos.customers.find(&with_appts, 1).await.unwrap();
    let third = repos.customers.find(&ctx(), 1).await.unwrap();

    // One base-entity fetch across three different relation requests.
    assert_eq!(upstreams.customers.fetch_calls(), 1);

    assert!(first.subscriptions.is_loaded());
    assert!(!first.appointments.is_loaded());
    assert!(second.appointments.is_loaded());
    assert!(!second.subscriptions.is_loaded());
    assert!(!third.subscriptions.is_loaded());
    assert!(!third.appointments.is_loaded());
}

#[tokio::test]
async fn test_relation_fetches_keep_per_key_cache_granularity() {
    let upstreams = InMemoryUpstreams::new();
    upstreams
        .appointments
        .extend([
            appointment(1, OFFICE, 7, Some(10)),
            appointment(2, OFFICE, 7, Some(10)),
            appointment(3, OFFICE, 7, Some(20)),
        ])
        .await;
    upstreams
        .subscriptions
        .extend([
            subscription(10, OFFICE, 7, None),
            subscription(20, OFFICE, 7, None),
        ])
        .await;
    let repos = Repositories::wire_cached(&upstreams, cache(), policy()).unwrap();

    let ctx = ctx().with_related(["subscription"]).unwrap();
    repos.appointments.find_many(&ctx, &[1, 2, 3]).await.unwrap();

    // The cached target denies batched loading, so resolution degrades to
    // one fetch per distinct key; the repeated key is a cache hit.
    assert_eq!(upstreams.subscriptions.fetch_many_calls(), 2);

    // A second pass is served entirely from cache.
    repos.appointments.find_many(&ctx, &[1, 2, 3]).await.unwrap();
    assert_eq!(upstreams.subscriptions.fetch_many_calls(), 2);
    assert_eq!(upstreams.appointments.fetch_many_calls(), 1);
}

#[tokio::test]
async fn test_office_tag_invalidation_refetches() {
    let upstreams = InMemoryUpstreams::new();
    upstreams.customers.insert(customer(1, OFFICE)).await;
    let shared = cache();
    let repos =
        Repositories::wire_cached(&upstreams, shared.clone(), policy()).unwrap();

    repos.customers.find(&ctx(), 1).await.unwrap();
    repos.customers.find(&ctx(), 1).await.unwrap();
    assert_eq!(upstreams.customers.fetch_calls(), 1);

    shared.delete_tag("office:1").await.unwrap();

    repos.customers.find(&ctx(), 1).await.unwrap();
    assert_eq!(upstreams.customers.fetch_calls(), 2);
}

#[tokio::test]
async fn test_other_office_entries_survive_tag_invalidation() {
    let upstreams = InMemoryUpstreams::new();
    upstreams
        .customers
        .extend([customer(1, OFFICE), customer(2, 2)])
        .await;
    let shared = cache();
    let repos =
        Repositories::wire_cached(&upstreams, shared.clone(), policy()).unwrap();

    let other = Context::new().with_office(2);
    repos.customers.find(&ctx(), 1).await.unwrap();
    repos.customers.find(&other, 2).await.unwrap();

    shared.delete_tag("office:1").await.unwrap();

    repos.customers.find(&other, 2).await.unwrap();
    assert_eq!(upstreams.customers.fetch_calls(), 2);
}

#[tokio::test]
async fn test_interleaved_offices_each_tag_their_own_entry() {
    let upstreams = InMemoryUpstreams::new();
    upstreams
        .customers
        .extend([customer(1, OFFICE), customer(2, 2)])
        .await;
    let shared = cache();
    let repos =
        Repositories::wire_cached(&upstreams, shared.clone(), policy()).unwrap();

    // Two requests for different offices through the same shared
    // repository; each cached entry must carry its own office tag.
    let other = Context::new().with_office(2);
    let office_ctx = ctx();
    let (first, second) = tokio::join!(
        repos.customers.find(&office_ctx, 1),
        repos.customers.find(&other, 2),
    );
    first.unwrap();
    second.unwrap();
    assert_eq!(upstreams.customers.fetch_calls(), 2);

    shared.delete_tag("office:2").await.unwrap();

    // The office-2 entry is gone, the office-1 entry is untouched.
    repos.customers.find(&other, 2).await.unwrap();
    assert_eq!(upstreams.customers.fetch_calls(), 3);
    repos.customers.find(&ctx(), 1).await.unwrap();
    assert_eq!(upstreams.customers.fetch_calls(), 3);
}

#[tokio::test]
async fn test_forget_single_entry_refetches() {
    let upstream = Arc::new(InMemoryUpstream::new());
    upstream.insert(customer(1, OFFICE)).await;
    let repo = CachedRepository::new(
        Arc::new(customers::plain(upstream.clone())),
        cache(),
        "customers",
        policy(),
    );

    let ctx = ctx();
    repo.find(&ctx, 1).await.unwrap();

    let key = repo.layer().key_for("find", &(&ctx, 1i64)).unwrap();
    repo.layer().forget(&key).await.unwrap();

    repo.find(&ctx, 1).await.unwrap();
    assert_eq!(upstream.fetch_calls(), 2);
}

#[tokio::test]
async fn test_ttl_expiry_refetches() {
    let upstreams = InMemoryUpstreams::new();
    upstreams.customers.insert(customer(1, OFFICE)).await;
    let policy = CachePolicy::new(Duration::from_millis(50));
    let repos = Repositories::wire_cached(&upstreams, cache(), policy).unwrap();

    repos.customers.find(&ctx(), 1).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    repos.customers.find(&ctx(), 1).await.unwrap();

    assert_eq!(upstreams.customers.fetch_calls(), 2);
}

#[tokio::test]
async fn test_pagination_is_part_of_the_key() {
    let upstreams = InMemoryUpstreams::new();
    upstreams
        .customers
        .extend((1..=20).map(|id| customer(id, OFFICE)))
        .await;
    let repos = Repositories::wire_cached(&upstreams, cache(), policy()).unwrap();

    let criteria = SearchCriteria::new();
    let page_one = ctx().with_pagination(1, 10);
    let page_two = ctx().with_pagination(2, 10);

    repos.customers.search(&page_one, &criteria).await.unwrap();
    repos.customers.search(&page_two, &criteria).await.unwrap();
    repos.customers.search(&page_one, &criteria).await.unwrap();

    assert_eq!(upstreams.customers.search_calls(), 2);
}

#[tokio::test]
async fn test_search_by_is_cached() {
    let upstreams = InMemoryUpstreams::new();
    upstreams
        .subscriptions
        .insert(subscription(10, OFFICE, 7, None))
        .await;
    let repos = Repositories::wire_cached(&upstreams, cache(), policy()).unwrap();

    let values = [AttrValue::Int(7)];
    let first = repos
        .subscriptions
        .search_by(&ctx(), "customerID", &values)
        .await
        .unwrap();
    let second = repos
        .subscriptions
        .search_by(&ctx(), "customerID", &values)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(upstreams.subscriptions.search_calls(), 1);
}
