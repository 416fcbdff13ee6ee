mod common;

use std::sync::Arc;

use common::*;
use megacommerce_wishlists::models::{
  context::{Context, ContextError},
  errors::ResolveError,
};

#[tokio::test]
async fn cache_hit_skips_catalog_and_replica() {
  let cached = product("p1");
  let cache =
    Arc::new(MockCache::with_entry("product::p1", &serde_json::to_string(&cached).unwrap()));
  let catalog = Arc::new(MockCatalog::with_products(&["p1"]));
  let replica = Arc::new(MockReplica::default());

  let res =
    resolver(cache.clone(), catalog.clone(), replica.clone()).resolve(ctx(), "p1").await.unwrap();

  assert_eq!(res, cached);
  assert!(catalog.get_calls().is_empty());
  assert_eq!(replica.get_calls(), 0);
  assert!(replica.upserts().is_empty());
  assert!(cache.sets().is_empty());
}

#[tokio::test]
async fn catalog_hit_writes_back_to_replica_and_cache_once() {
  let cache = Arc::new(MockCache::default());
  let catalog = Arc::new(MockCatalog::with_products(&["p1"]));
  let replica = Arc::new(MockReplica::default());

  let res =
    resolver(cache.clone(), catalog.clone(), replica.clone()).resolve(ctx(), "p1").await.unwrap();

  assert_eq!(res, product("p1"));
  assert_eq!(catalog.get_calls(), vec!["p1"]);
  assert_eq!(replica.upserts(), vec!["p1"]);
  assert_eq!(cache.sets(), vec!["product::p1"]);
  assert_eq!(cache.ttls(), vec![TTL]);
  assert_eq!(replica.get_calls(), 0);
}

#[tokio::test]
async fn write_back_failures_do_not_fail_resolution() {
  let cache = Arc::new(MockCache { fail_get: true, fail_set: true, ..Default::default() });
  let catalog = Arc::new(MockCatalog::with_products(&["p1"]));
  let replica = Arc::new(MockReplica { fail_upsert: true, ..Default::default() });

  let res = resolver(cache.clone(), catalog, replica.clone()).resolve(ctx(), "p1").await.unwrap();

  assert_eq!(res, product("p1"));
  assert_eq!(replica.upserts(), vec!["p1"]);
  assert_eq!(cache.sets(), vec!["product::p1"]);
}

#[tokio::test]
async fn catalog_not_found_deletes_from_replica_then_reads_it() {
  let cache = Arc::new(MockCache::default());
  let catalog =
    Arc::new(MockCatalog { not_found: ["p1".to_string()].into(), ..Default::default() });
  let replica = Arc::new(MockReplica::with_products(vec![tombstone("p1")]));

  let res = resolver(cache.clone(), catalog, replica.clone()).resolve(ctx(), "p1").await.unwrap();

  assert!(res.is_deleted());
  assert_eq!(replica.deletes(), vec!["p1"]);
  assert_eq!(replica.get_calls(), 1);
  assert!(replica.upserts().is_empty());
  assert_eq!(cache.sets(), vec!["product::p1"]);
  assert_eq!(cache.ttls(), vec![TTL]);
}

#[tokio::test]
async fn catalog_failure_falls_back_to_replica() {
  let cache = Arc::new(MockCache::default());
  let catalog = Arc::new(MockCatalog { failing: ["p1".to_string()].into(), ..Default::default() });
  let replica = Arc::new(MockReplica::with_products(vec![product("p1")]));

  let res = resolver(cache, catalog, replica.clone()).resolve(ctx(), "p1").await.unwrap();

  assert_eq!(res, product("p1"));
  assert!(replica.deletes().is_empty());
  assert_eq!(replica.get_calls(), 1);
}

#[tokio::test]
async fn replica_error_is_fatal() {
  let catalog = Arc::new(MockCatalog { failing: ["p1".to_string()].into(), ..Default::default() });
  let replica = Arc::new(MockReplica { fail_get: true, ..Default::default() });

  let err = resolver(Arc::new(MockCache::default()), catalog, replica)
    .resolve(ctx(), "p1")
    .await
    .unwrap_err();

  assert!(matches!(err, ResolveError::Database(_)));
  assert!(err.to_string().starts_with("error fetching from database: "));
}

#[tokio::test]
async fn absent_everywhere_is_not_found() {
  let cache = Arc::new(MockCache::default());
  let err =
    resolver(cache.clone(), Arc::new(MockCatalog::default()), Arc::new(MockReplica::default()))
      .resolve(ctx(), "p9")
      .await
      .unwrap_err();

  match err {
    ResolveError::NotFound(what) => assert_eq!(what, "product p9"),
    other => panic!("unexpected error: {other:?}"),
  }
  assert!(cache.sets().is_empty());
}

#[tokio::test]
async fn empty_id_is_rejected_without_io() {
  let cache = Arc::new(MockCache::default());
  let catalog = Arc::new(MockCatalog::default());
  let replica = Arc::new(MockReplica::default());

  let err =
    resolver(cache.clone(), catalog.clone(), replica.clone()).resolve(ctx(), "").await.unwrap_err();

  match err {
    ResolveError::Validation { field } => assert_eq!(field, "productID"),
    other => panic!("unexpected error: {other:?}"),
  }
  assert!(cache.gets.lock().unwrap().is_empty());
  assert!(catalog.get_calls().is_empty());
  assert_eq!(replica.get_calls(), 0);
}

#[tokio::test]
async fn undecodable_cache_entry_is_a_miss() {
  let cache = Arc::new(MockCache::with_entry("product::p1", "{not json"));
  let catalog = Arc::new(MockCatalog::with_products(&["p1"]));

  let res = resolver(cache.clone(), catalog.clone(), Arc::new(MockReplica::default()))
    .resolve(ctx(), "p1")
    .await
    .unwrap();

  assert_eq!(res, product("p1"));
  assert_eq!(catalog.get_calls(), vec!["p1"]);
  assert!(cache.entry("product::p1").unwrap().contains("\"id\":\"p1\""));
}

#[tokio::test]
async fn resolving_twice_yields_equal_products() {
  let cache = Arc::new(MockCache::default());
  let catalog = Arc::new(MockCatalog::with_products(&["p1"]));
  let r = resolver(cache, catalog.clone(), Arc::new(MockReplica::default()));

  let first = r.resolve(ctx(), "p1").await.unwrap();
  let second = r.resolve(ctx(), "p1").await.unwrap();

  assert_eq!(first, second);
  assert_eq!(catalog.get_calls().len(), 1);
}

#[tokio::test]
async fn cancelled_context_surfaces_as_error() {
  let (cctx, cancel) = Context::new("req-2").with_cancel();
  cancel.cancel();
  let catalog = Arc::new(MockCatalog::with_products(&["p1"]));
  let replica = Arc::new(MockReplica::default());

  let err = resolver(Arc::new(MockCache::default()), catalog.clone(), replica)
    .resolve(Arc::new(cctx), "p1")
    .await
    .unwrap_err();

  assert!(matches!(err, ResolveError::Context(ContextError::Cancelled)));
  assert!(catalog.get_calls().is_empty());
}
