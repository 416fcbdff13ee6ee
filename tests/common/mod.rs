#![allow(dead_code)]

use std::{
  collections::{HashMap, HashSet},
  str::FromStr,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  },
  time::Duration,
};

use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use megacommerce_wishlists::{
  aggregator::{ConcurrentAggregator, ConcurrentAggregatorArgs},
  models::{
    context::{CancelHandle, Context},
    errors::{ErrorType, StoreError},
    products::{Product, ProductRating},
    wishlists::{OutgoingCustomer, Wishlist},
  },
  resolver::{ProductListResolver, ProductListResolverArgs, ProductResolver, ProductResolverArgs},
  store::{
    cache::CacheStore,
    database::{ProductReplica, ProductSource, WishlistsStore},
  },
};

pub const TTL: Duration = Duration::from_secs(60);

pub fn product(id: &str) -> Product {
  let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
  Product {
    id: id.to_string(),
    name: format!("product {}", id),
    description: "a product".into(),
    price: BigDecimal::from_str("19.99").unwrap(),
    category: "books".into(),
    images: vec![format!("https://img.example.com/{}.png", id)],
    rating: Some(ProductRating { average: 4.5, count: 12 }),
    created_at: ts,
    updated_at: ts,
    deleted_at: None,
  }
}

pub fn tombstone(id: &str) -> Product {
  let mut p = product(id);
  p.deleted_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
  p
}

pub fn customer() -> OutgoingCustomer {
  OutgoingCustomer {
    id: "c1".into(),
    name: "Ada Lovelace".into(),
    email: "ada@example.com".into(),
    created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
  }
}

pub fn ctx() -> Arc<Context> {
  Arc::new(Context::new("req-1"))
}

fn unavailable(path: &str) -> StoreError {
  StoreError::new(ErrorType::Connection, None, "unavailable", path, "")
}

#[derive(Debug, Default)]
pub struct MockCache {
  pub entries: Mutex<HashMap<String, String>>,
  pub fail_get: bool,
  pub fail_set: bool,
  pub gets: Mutex<Vec<String>>,
  pub sets: Mutex<Vec<String>>,
  pub ttls: Mutex<Vec<Duration>>,
}

impl MockCache {
  pub fn with_entry(key: &str, value: &str) -> Self {
    let cache = Self::default();
    cache.entries.lock().unwrap().insert(key.into(), value.into());
    cache
  }

  pub fn sets(&self) -> Vec<String> {
    self.sets.lock().unwrap().clone()
  }

  pub fn ttls(&self) -> Vec<Duration> {
    self.ttls.lock().unwrap().clone()
  }

  pub fn entry(&self, key: &str) -> Option<String> {
    self.entries.lock().unwrap().get(key).cloned()
  }
}

#[tonic::async_trait]
impl CacheStore for MockCache {
  async fn get(&self, _: Arc<Context>, key: &str) -> Result<String, StoreError> {
    self.gets.lock().unwrap().push(key.into());
    if self.fail_get {
      return Err(unavailable("mock.cache.get"));
    }
    Ok(self.entry(key).unwrap_or_default())
  }

  async fn set(
    &self,
    _: Arc<Context>,
    key: &str,
    value: &str,
    ttl: Duration,
  ) -> Result<(), StoreError> {
    self.sets.lock().unwrap().push(key.into());
    self.ttls.lock().unwrap().push(ttl);
    if self.fail_set {
      return Err(unavailable("mock.cache.set"));
    }
    self.entries.lock().unwrap().insert(key.into(), value.into());
    Ok(())
  }

  async fn delete(&self, _: Arc<Context>, keys: &[String]) -> Result<(), StoreError> {
    let mut entries = self.entries.lock().unwrap();
    for key in keys {
      entries.remove(key);
    }
    Ok(())
  }
}

/// Catalog fake. Ids in `not_found` answer with a not-found error, ids in `failing`
/// with a connection error, unknown ids with `Ok(None)`. `cancel_on_list` fires
/// while a listing is being served.
#[derive(Debug, Default)]
pub struct MockCatalog {
  pub products: HashMap<String, Product>,
  pub not_found: HashSet<String>,
  pub failing: HashSet<String>,
  pub delays: HashMap<String, Duration>,
  pub page: Option<Vec<Product>>,
  pub list_fails: bool,
  pub cancel_on_list: Mutex<Option<CancelHandle>>,
  pub get_calls: Mutex<Vec<String>>,
  pub list_calls: AtomicUsize,
}

impl MockCatalog {
  pub fn with_products(ids: &[&str]) -> Self {
    let products = ids.iter().map(|id| (id.to_string(), product(id))).collect();
    Self { products, ..Default::default() }
  }

  pub fn get_calls(&self) -> Vec<String> {
    self.get_calls.lock().unwrap().clone()
  }

  pub fn list_calls(&self) -> usize {
    self.list_calls.load(Ordering::SeqCst)
  }
}

#[tonic::async_trait]
impl ProductSource for MockCatalog {
  async fn get_by_id(&self, ctx: Arc<Context>, id: &str) -> Result<Option<Product>, StoreError> {
    self.get_calls.lock().unwrap().push(id.into());

    if let Some(delay) = self.delays.get(id) {
      ctx.run(tokio::time::sleep(*delay)).await?;
    }

    if self.failing.contains(id) {
      return Err(unavailable("mock.catalog.get_by_id"));
    }
    if self.not_found.contains(id) {
      let path = "mock.catalog.get_by_id";
      return Err(StoreError::new(ErrorType::NotFound, None, "gone", path, id));
    }
    Ok(self.products.get(id).cloned())
  }

  async fn list(
    &self,
    _: Arc<Context>,
    _: u32,
    _: u32,
  ) -> Result<Option<Vec<Product>>, StoreError> {
    self.list_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(cancel) = self.cancel_on_list.lock().unwrap().take() {
      cancel.cancel();
    }
    if self.list_fails {
      return Err(unavailable("mock.catalog.list"));
    }
    Ok(self.page.clone())
  }
}

#[derive(Debug, Default)]
pub struct MockReplica {
  pub products: HashMap<String, Product>,
  pub page: Option<Vec<Product>>,
  pub fail_get: bool,
  pub fail_list: bool,
  pub fail_upsert: bool,
  pub get_calls: AtomicUsize,
  pub upserts: Mutex<Vec<String>>,
  pub deletes: Mutex<Vec<String>>,
}

impl MockReplica {
  pub fn with_products(products: Vec<Product>) -> Self {
    let products = products.into_iter().map(|p| (p.id.clone(), p)).collect();
    Self { products, ..Default::default() }
  }

  pub fn get_calls(&self) -> usize {
    self.get_calls.load(Ordering::SeqCst)
  }

  pub fn upserts(&self) -> Vec<String> {
    let mut ids = self.upserts.lock().unwrap().clone();
    ids.sort();
    ids
  }

  pub fn deletes(&self) -> Vec<String> {
    self.deletes.lock().unwrap().clone()
  }
}

#[tonic::async_trait]
impl ProductSource for MockReplica {
  async fn get_by_id(&self, _: Arc<Context>, id: &str) -> Result<Option<Product>, StoreError> {
    self.get_calls.fetch_add(1, Ordering::SeqCst);
    if self.fail_get {
      return Err(unavailable("mock.replica.get_by_id"));
    }
    Ok(self.products.get(id).cloned())
  }

  async fn list(
    &self,
    _: Arc<Context>,
    _: u32,
    _: u32,
  ) -> Result<Option<Vec<Product>>, StoreError> {
    if self.fail_list {
      return Err(unavailable("mock.replica.list"));
    }
    Ok(self.page.clone())
  }
}

#[tonic::async_trait]
impl ProductReplica for MockReplica {
  async fn upsert(&self, _: Arc<Context>, product: &Product) -> Result<(), StoreError> {
    self.upserts.lock().unwrap().push(product.id.clone());
    if self.fail_upsert {
      return Err(unavailable("mock.replica.upsert"));
    }
    Ok(())
  }

  async fn delete(&self, _: Arc<Context>, id: &str) -> Result<(), StoreError> {
    self.deletes.lock().unwrap().push(id.into());
    Ok(())
  }
}

#[derive(Debug, Default)]
pub struct MockWishlists {
  pub wishlists: Vec<Wishlist>,
  pub fail: bool,
}

impl MockWishlists {
  pub fn new(wishlists: Vec<Wishlist>) -> Self {
    Self { wishlists, fail: false }
  }
}

pub fn wishlist(id: &str, items: &[&str]) -> Wishlist {
  Wishlist {
    id: id.into(),
    customer_id: "c1".into(),
    title: format!("wishlist {}", id),
    items: items.iter().map(|s| s.to_string()).collect(),
  }
}

#[tonic::async_trait]
impl WishlistsStore for MockWishlists {
  async fn get_by_id(&self, _: Arc<Context>, id: &str) -> Result<Wishlist, StoreError> {
    if self.fail {
      return Err(unavailable("mock.wishlists.get_by_id"));
    }
    self
      .wishlists
      .iter()
      .find(|w| w.id == id)
      .cloned()
      .ok_or_else(|| {
        StoreError::new(ErrorType::NoRows, None, "no wishlist", "mock.wishlists.get_by_id", id)
      })
  }

  async fn get_by_customer_id(
    &self,
    _: Arc<Context>,
    customer_id: &str,
  ) -> Result<Vec<Wishlist>, StoreError> {
    if self.fail {
      return Err(unavailable("mock.wishlists.get_by_customer_id"));
    }
    Ok(self.wishlists.iter().filter(|w| w.customer_id == customer_id).cloned().collect())
  }
}

pub fn resolver(
  cache: Arc<MockCache>,
  catalog: Arc<MockCatalog>,
  replica: Arc<MockReplica>,
) -> ProductResolver {
  ProductResolver::new(ProductResolverArgs { cache, service: catalog, replica, ttl: TTL })
}

pub fn list_resolver(
  cache: Arc<MockCache>,
  catalog: Arc<MockCatalog>,
  replica: Arc<MockReplica>,
) -> ProductListResolver {
  ProductListResolver::new(ProductListResolverArgs { cache, service: catalog, replica, ttl: TTL })
}

pub fn aggregator(
  catalog: MockCatalog,
  replica: MockReplica,
  wishlists: MockWishlists,
) -> ConcurrentAggregator {
  let resolver = resolver(Arc::new(MockCache::default()), Arc::new(catalog), Arc::new(replica));
  ConcurrentAggregator::new(ConcurrentAggregatorArgs {
    resolver: Arc::new(resolver),
    wishlists: Arc::new(wishlists),
  })
}
