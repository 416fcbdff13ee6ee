use std::{sync::Arc, time::Duration};

use deadpool_redis::{Config as RedisConfig, Pool, Runtime};
use redis::AsyncCommands;

use crate::{
  models::{
    context::Context,
    errors::{ErrorType, StoreError},
  },
  store::cache::CacheStore,
};

/// Redis backed cache shared by every instance of the service.
#[derive(Clone)]
pub struct RedisCache {
  pool: Pool,
}

impl std::fmt::Debug for RedisCache {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RedisCache").field("status", &self.pool.status()).finish()
  }
}

impl RedisCache {
  pub fn new(url: &str, pool_size: usize) -> Result<Self, StoreError> {
    let mut cfg = RedisConfig::from_url(url);
    if let Some(ref mut pool_cfg) = cfg.pool {
      pool_cfg.max_size = pool_size;
    } else {
      cfg.pool = Some(deadpool_redis::PoolConfig::new(pool_size));
    }

    let pool = cfg.create_pool(Some(Runtime::Tokio1)).map_err(|e| {
      StoreError::new(
        ErrorType::Connection,
        Some(Box::new(e)),
        "failed to create redis pool",
        "wishlists.store.cache.new",
        "",
      )
    })?;

    Ok(Self { pool })
  }

  pub async fn ping(&self) -> Result<(), StoreError> {
    let path = "wishlists.store.cache.ping";
    let mut conn = self.pool.get().await.map_err(|e| connection_error(e, path))?;

    let _: String = redis::cmd("PING").query_async(&mut conn).await.map_err(|e| {
      StoreError::new(ErrorType::Connection, Some(Box::new(e)), "redis ping failed", path, "")
    })?;

    Ok(())
  }
}

#[tonic::async_trait]
impl CacheStore for RedisCache {
  // Connection failures are reported as a miss, the same as an absent key.
  async fn get(&self, ctx: Arc<Context>, key: &str) -> Result<String, StoreError> {
    let fetch = async {
      let mut conn = match self.pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
          tracing::warn!(key = %key, error = %e, "failed to get redis connection");
          return None;
        }
      };

      match conn.get::<_, Option<String>>(key).await {
        Ok(value) => value,
        Err(e) => {
          tracing::warn!(key = %key, error = %e, "redis GET error");
          None
        }
      }
    };

    Ok(ctx.run(fetch).await?.unwrap_or_default())
  }

  async fn set(
    &self,
    ctx: Arc<Context>,
    key: &str,
    value: &str,
    ttl: Duration,
  ) -> Result<(), StoreError> {
    let path = "wishlists.store.cache.set";
    let write = async {
      let mut conn = self.pool.get().await.map_err(|e| connection_error(e, path))?;

      conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1)).await.map_err(|e| {
        StoreError::new(ErrorType::Internal, Some(Box::new(e)), "redis SET failed", path, key)
      })
    };

    ctx.run(write).await?
  }

  async fn delete(&self, ctx: Arc<Context>, keys: &[String]) -> Result<(), StoreError> {
    if keys.is_empty() {
      return Ok(());
    }

    let path = "wishlists.store.cache.delete";
    let remove = async {
      let mut conn = self.pool.get().await.map_err(|e| connection_error(e, path))?;

      conn.del::<_, ()>(keys).await.map_err(|e| {
        let details = keys.join(",");
        StoreError::new(ErrorType::Internal, Some(Box::new(e)), "redis DEL failed", path, details)
      })
    };

    ctx.run(remove).await?
  }
}

fn connection_error(err: deadpool_redis::PoolError, path: &str) -> StoreError {
  let msg = "failed to get redis connection";
  StoreError::new(ErrorType::Connection, Some(Box::new(err)), msg, path, "")
}
