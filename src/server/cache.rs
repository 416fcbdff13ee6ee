use std::sync::Arc;

use crate::models::{
  config::CacheConfig,
  errors::{ErrorType, InternalError},
};
use crate::server::Server;
use crate::store::cache::{CacheStore, MemoryCache, RedisCache};

impl Server {
  pub(super) async fn init_cache(cfg: &CacheConfig) -> Result<Arc<dyn CacheStore>, InternalError> {
    let url = match cfg.redis_url.as_deref() {
      Some(url) if !url.is_empty() => url,
      _ => {
        tracing::info!("redis is not configured, using the in-process cache");
        return Ok(Arc::new(MemoryCache::new()));
      }
    };

    let mk_err = |msg: &str, err: Box<dyn std::error::Error + Send + Sync>| InternalError {
      temp: true,
      err_type: ErrorType::Connection,
      err,
      msg: msg.to_string(),
      path: "wishlists.server.init_cache".into(),
    };

    let cache = RedisCache::new(url, cfg.pool_size)
      .map_err(|e| mk_err("failed to initialize cache", Box::new(e)))?;
    cache.ping().await.map_err(|e| mk_err("failed to reach redis", Box::new(e)))?;

    tracing::info!("connected to redis");
    Ok(Arc::new(cache))
  }
}
