use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinSet};

use crate::{
  aggregator::ConcurrentAggregator,
  models::{
    context::Context,
    errors::ResolveError,
    products::Product,
    wishlists::{FulfilledWishlist, OutgoingCustomer},
  },
  resolver::ProductResolver,
};

impl ConcurrentAggregator {
  /// Resolves every wishlist of `customer`. The first item that fails to resolve
  /// fails the whole call and no partial result is returned.
  ///
  /// Wishlists keep the repository order; items within a wishlist are in the order
  /// their resolution completed.
  pub async fn fulfill_customer_wishlists(
    &self,
    ctx: Arc<Context>,
    customer: OutgoingCustomer,
  ) -> Result<Vec<FulfilledWishlist>, ResolveError> {
    let path = "wishlists.aggregator.fulfill_customer_wishlists";
    let wishlists = self
      .wishlists
      .get_by_customer_id(ctx.clone(), &customer.id)
      .await
      .map_err(ResolveError::Store)?;

    if wishlists.is_empty() {
      return Ok(vec![]);
    }

    // capacity 1 and try_send: only the first error is kept
    let (err_tx, mut err_rx) = mpsc::channel::<ResolveError>(1);
    let mut tasks = JoinSet::new();
    let mut slots: Vec<Option<FulfilledWishlist>> = vec![None; wishlists.len()];

    for (index, wishlist) in wishlists.into_iter().enumerate() {
      let err_tx = err_tx.clone();
      let ctx = ctx.clone();
      let resolver = self.resolver.clone();
      let customer = customer.clone();

      tasks.spawn(async move {
        if let Some(err) = ctx.err() {
          let _ = err_tx.try_send(err.into());
          return None;
        }

        let items = resolve_all(resolver, ctx, wishlist.items, err_tx).await?;
        Some((index, FulfilledWishlist { id: wishlist.id, customer, title: wishlist.title, items }))
      });
    }
    drop(err_tx);

    loop {
      tokio::select! {
        biased;
        Some(err) = err_rx.recv() => {
          tasks.abort_all();
          let (request_id, customer_id) = (ctx.request_id.as_str(), customer.id.as_str());
          tracing::warn!(path, request_id, customer_id, error = %err, "wishlists not fulfilled");
          return Err(err);
        }
        joined = tasks.join_next() => match joined {
          Some(Ok(Some((index, wishlist)))) => slots[index] = Some(wishlist),
          Some(Ok(None)) => {}
          Some(Err(err)) => {
            tasks.abort_all();
            tracing::error!(path, error = %err, "wishlist task failed");
            return Err(ResolveError::Internal(err.to_string()));
          }
          None => break,
        },
      }
    }

    if let Ok(err) = err_rx.try_recv() {
      return Err(err);
    }

    Ok(slots.into_iter().flatten().collect())
  }
}

// Returns `None` once an error has been reported on `err_tx`.
async fn resolve_all(
  resolver: Arc<ProductResolver>,
  ctx: Arc<Context>,
  product_ids: Vec<String>,
  err_tx: mpsc::Sender<ResolveError>,
) -> Option<Vec<Product>> {
  if product_ids.is_empty() {
    return Some(vec![]);
  }

  let mut tasks = JoinSet::new();
  for product_id in product_ids.iter().cloned() {
    let ctx = ctx.clone();
    let resolver = resolver.clone();
    let err_tx = err_tx.clone();

    tasks.spawn(async move {
      if let Some(err) = ctx.err() {
        let _ = err_tx.try_send(err.into());
        return None;
      }

      match resolver.resolve(ctx, &product_id).await {
        Ok(product) => Some(product),
        Err(err) => {
          let _ = err_tx.try_send(err);
          None
        }
      }
    });
  }

  let mut items = Vec::with_capacity(product_ids.len());
  while let Some(res) = tasks.join_next().await {
    match res {
      Ok(Some(product)) => items.push(product),
      Ok(None) => return None,
      Err(err) => {
        let _ = err_tx.try_send(ResolveError::Internal(err.to_string()));
        return None;
      }
    }
  }

  Some(items)
}
