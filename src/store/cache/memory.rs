use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use dashmap::DashMap;

use crate::{
  models::{context::Context, errors::StoreError},
  store::cache::CacheStore,
};

#[derive(Debug, Clone)]
struct Entry {
  value: String,
  expires_at: Instant,
}

/// In-process cache for single instance deployments.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
  entries: Arc<DashMap<String, Entry>>,
}

impl MemoryCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[tonic::async_trait]
impl CacheStore for MemoryCache {
  async fn get(&self, _: Arc<Context>, key: &str) -> Result<String, StoreError> {
    if let Some(entry) = self.entries.get(key) {
      if entry.expires_at > Instant::now() {
        return Ok(entry.value.clone());
      }
    }

    // expired entries are dropped lazily
    self.entries.remove_if(key, |_, entry| entry.expires_at <= Instant::now());
    Ok(String::new())
  }

  async fn set(
    &self,
    _: Arc<Context>,
    key: &str,
    value: &str,
    ttl: Duration,
  ) -> Result<(), StoreError> {
    let entry = Entry { value: value.to_string(), expires_at: Instant::now() + ttl };
    self.entries.insert(key.to_string(), entry);
    Ok(())
  }

  async fn delete(&self, _: Arc<Context>, keys: &[String]) -> Result<(), StoreError> {
    for key in keys {
      self.entries.remove(key);
    }
    Ok(())
  }
}
