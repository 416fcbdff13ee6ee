use std::{sync::Arc, time::Duration};

use crate::{
  models::{context::Context, errors::ResolveError, products::Product},
  resolver::{cache_lookup, cache_store},
  store::{
    cache::{product_key, CacheStore},
    database::{ProductReplica, ProductSource},
  },
};

/// Resolves a single product through cache, catalog service and replica, in that
/// order, repairing the cache and replica from whatever tier answers.
#[derive(Debug, Clone)]
pub struct ProductResolver {
  cache: Arc<dyn CacheStore>,
  service: Arc<dyn ProductSource>,
  replica: Arc<dyn ProductReplica>,
  ttl: Duration,
}

#[derive(Debug)]
pub struct ProductResolverArgs {
  pub cache: Arc<dyn CacheStore>,
  pub service: Arc<dyn ProductSource>,
  pub replica: Arc<dyn ProductReplica>,
  pub ttl: Duration,
}

impl ProductResolver {
  pub fn new(args: ProductResolverArgs) -> Self {
    Self { cache: args.cache, service: args.service, replica: args.replica, ttl: args.ttl }
  }

  pub async fn resolve(
    &self,
    ctx: Arc<Context>,
    product_id: &str,
  ) -> Result<Product, ResolveError> {
    let path = "wishlists.resolver.resolve";
    if product_id.is_empty() {
      return Err(ResolveError::validation("productID"));
    }

    if let Some(err) = ctx.err() {
      return Err(err.into());
    }

    let request_id = ctx.request_id.clone();
    let key = product_key(product_id);
    let cached = cache_lookup::<Product>(self.cache.as_ref(), ctx.clone(), &key, path).await;
    if let Some(product) = cached {
      tracing::debug!(path, product_id, "cache hit");
      return Ok(product);
    }

    if let Some(err) = ctx.err() {
      return Err(err.into());
    }

    match self.service.get_by_id(ctx.clone(), product_id).await {
      Ok(Some(product)) => {
        if let Err(err) = self.replica.upsert(ctx.clone(), &product).await {
          tracing::warn!(
            path,
            request_id = %request_id,
            product_id,
            error = %err,
            "failed to upsert into replica"
          );
        }
        cache_store(self.cache.as_ref(), ctx, &key, &product, self.ttl, path).await;
        return Ok(product);
      }
      Ok(None) => {
        tracing::debug!(
          path,
          request_id = %request_id,
          product_id,
          "catalog returned no product, using replica"
        );
      }
      Err(err) if err.is_not_found() => {
        tracing::info!(
          path,
          request_id = %request_id,
          product_id,
          "product is gone from the catalog"
        );
        if let Err(err) = self.replica.delete(ctx.clone(), product_id).await {
          tracing::warn!(
            path,
            request_id = %request_id,
            product_id,
            error = %err,
            "failed to delete from replica"
          );
        }
      }
      Err(err) => {
        tracing::warn!(
          path,
          request_id = %request_id,
          product_id,
          error = %err,
          "catalog lookup failed"
        );
      }
    }

    if let Some(err) = ctx.err() {
      return Err(err.into());
    }

    match self.replica.get_by_id(ctx.clone(), product_id).await {
      Ok(Some(product)) => {
        cache_store(self.cache.as_ref(), ctx, &key, &product, self.ttl, path).await;
        Ok(product)
      }
      Ok(None) => Err(ResolveError::NotFound(format!("product {}", product_id))),
      Err(err) => Err(ResolveError::Database(err)),
    }
  }
}
