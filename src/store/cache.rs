mod memory;
mod redis_cache;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

use std::{fmt, sync::Arc, time::Duration};

use crate::models::{context::Context, errors::StoreError};

pub const PRODUCT_KEY_PREFIX: &str = "product";
pub const PRODUCTS_KEY_PREFIX: &str = "products";

/// Low latency key/value store with per-entry TTL.
///
/// A missing key is reported as `Ok(String::new())`, not as an error.
#[tonic::async_trait]
pub trait CacheStore: fmt::Debug + Send + Sync {
  async fn get(&self, ctx: Arc<Context>, key: &str) -> Result<String, StoreError>;
  async fn set(
    &self,
    ctx: Arc<Context>,
    key: &str,
    value: &str,
    ttl: Duration,
  ) -> Result<(), StoreError>;
  async fn delete(&self, ctx: Arc<Context>, keys: &[String]) -> Result<(), StoreError>;
}

pub fn product_key(product_id: &str) -> String {
  format!("{}::{}", PRODUCT_KEY_PREFIX, product_id)
}

pub fn products_key(count: u32, offset: u32) -> String {
  format!("{}::{}::{}", PRODUCTS_KEY_PREFIX, count, offset)
}
