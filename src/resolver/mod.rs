mod product;
mod product_list;

pub use product::{ProductResolver, ProductResolverArgs};
pub use product_list::{ProductListResolver, ProductListResolverArgs};

use std::{sync::Arc, time::Duration};

use serde::{de::DeserializeOwned, Serialize};

use crate::{models::context::Context, store::cache::CacheStore};

/// Cache-aside read. Errors, empty values and undecodable values are all misses.
pub(crate) async fn cache_lookup<T: DeserializeOwned>(
  cache: &dyn CacheStore,
  ctx: Arc<Context>,
  key: &str,
  path: &str,
) -> Option<T> {
  let raw = match cache.get(ctx, key).await {
    Ok(raw) => raw,
    Err(err) => {
      tracing::warn!(path, key, error = %err, "cache lookup failed, treating as miss");
      return None;
    }
  };

  if raw.is_empty() {
    tracing::debug!(path, key, "cache miss");
    return None;
  }

  match serde_json::from_str::<T>(&raw) {
    Ok(value) => Some(value),
    Err(err) => {
      tracing::warn!(path, key, error = %err, "failed to decode cached value, treating as miss");
      None
    }
  }
}

/// Best-effort cache write.
pub(crate) async fn cache_store<T: Serialize + ?Sized>(
  cache: &dyn CacheStore,
  ctx: Arc<Context>,
  key: &str,
  value: &T,
  ttl: Duration,
  path: &str,
) {
  let raw = match serde_json::to_string(value) {
    Ok(raw) => raw,
    Err(err) => {
      tracing::warn!(path, key, error = %err, "failed to encode value for cache");
      return;
    }
  };

  if let Err(err) = cache.set(ctx, key, &raw, ttl).await {
    tracing::warn!(path, key, error = %err, "failed to write cache");
  }
}
