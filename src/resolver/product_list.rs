use std::{sync::Arc, time::Duration};

use tokio::task::JoinSet;

use crate::{
  models::{context::Context, errors::ResolveError, products::Product},
  resolver::{cache_lookup, cache_store},
  store::{
    cache::{products_key, CacheStore},
    database::{ProductReplica, ProductSource},
  },
};

/// Paginated listing through the same tiers as [`super::ProductResolver`]. Pages are
/// cached whole under their count/offset key.
#[derive(Debug, Clone)]
pub struct ProductListResolver {
  cache: Arc<dyn CacheStore>,
  service: Arc<dyn ProductSource>,
  replica: Arc<dyn ProductReplica>,
  ttl: Duration,
}

#[derive(Debug)]
pub struct ProductListResolverArgs {
  pub cache: Arc<dyn CacheStore>,
  pub service: Arc<dyn ProductSource>,
  pub replica: Arc<dyn ProductReplica>,
  pub ttl: Duration,
}

impl ProductListResolver {
  pub fn new(args: ProductListResolverArgs) -> Self {
    Self { cache: args.cache, service: args.service, replica: args.replica, ttl: args.ttl }
  }

  pub async fn list(
    &self,
    ctx: Arc<Context>,
    count: u32,
    offset: u32,
  ) -> Result<Vec<Product>, ResolveError> {
    let path = "wishlists.resolver.list";
    if let Some(err) = ctx.err() {
      return Err(err.into());
    }

    let request_id = ctx.request_id.clone();
    let key = products_key(count, offset);
    if let Some(products) =
      cache_lookup::<Vec<Product>>(self.cache.as_ref(), ctx.clone(), &key, path).await
    {
      tracing::debug!(path, key = %key, "cache hit");
      return Ok(products);
    }

    if let Some(err) = ctx.err() {
      return Err(err.into());
    }

    match self.service.list(ctx.clone(), count, offset).await {
      Ok(Some(products)) => {
        self.mirror(ctx.clone(), &products).await;
        cache_store(self.cache.as_ref(), ctx, &key, &products, self.ttl, path).await;
        return Ok(products);
      }
      Ok(None) => {
        tracing::debug!(
          path,
          request_id = %request_id,
          count,
          offset,
          "catalog returned no page, using replica"
        );
      }
      Err(err) => {
        tracing::warn!(
          path,
          request_id = %request_id,
          count,
          offset,
          error = %err,
          "catalog listing failed"
        );
      }
    }

    if let Some(err) = ctx.err() {
      return Err(err.into());
    }

    match self.replica.list(ctx.clone(), count, offset).await {
      Ok(Some(products)) => {
        cache_store(self.cache.as_ref(), ctx, &key, &products, self.ttl, path).await;
        Ok(products)
      }
      Ok(None) => Err(ResolveError::NotFound("products".into())),
      Err(err) => Err(ResolveError::Database(err)),
    }
  }

  // Upserts every product concurrently and waits for all of them. Failures are
  // logged only.
  async fn mirror(&self, ctx: Arc<Context>, products: &[Product]) {
    let path = "wishlists.resolver.list.mirror";
    let mut upserts = JoinSet::new();

    for product in products.iter().cloned() {
      let replica = self.replica.clone();
      let ctx = ctx.clone();
      upserts.spawn(async move {
        if let Some(err) = ctx.err() {
          let product_id = product.id.as_str();
          tracing::debug!(path, product_id, error = %err, "context done, skipping upsert");
          return;
        }

        let request_id = ctx.request_id.clone();
        if let Err(err) = replica.upsert(ctx, &product).await {
          let product_id = product.id.as_str();
          tracing::warn!(
            path,
            request_id = %request_id,
            product_id,
            error = %err,
            "failed to upsert into replica"
          );
        }
      });
    }

    while let Some(res) = upserts.join_next().await {
      if let Err(err) = res {
        tracing::error!(path, error = %err, "replica upsert task failed");
      }
    }
  }
}
