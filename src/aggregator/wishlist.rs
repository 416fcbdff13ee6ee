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
};

impl ConcurrentAggregator {
  /// Resolves one wishlist. Items that cannot be resolved are left out.
  pub async fn fulfill_wishlist(
    &self,
    ctx: Arc<Context>,
    customer: OutgoingCustomer,
    wishlist_id: &str,
  ) -> Result<FulfilledWishlist, ResolveError> {
    let wishlist =
      self.wishlists.get_by_id(ctx.clone(), wishlist_id).await.map_err(ResolveError::Store)?;

    let items = self.resolve_available(ctx, &wishlist.items).await;

    Ok(FulfilledWishlist { id: wishlist.id, customer, title: wishlist.title, items })
  }

  /// Resolves `product_ids` concurrently and returns the products that resolved, in
  /// the order they arrived.
  pub async fn resolve_available(&self, ctx: Arc<Context>, product_ids: &[String]) -> Vec<Product> {
    let path = "wishlists.aggregator.resolve_available";
    if product_ids.is_empty() {
      return vec![];
    }

    let (tx, mut rx) = mpsc::channel::<Product>(product_ids.len());
    let mut tasks = JoinSet::new();

    for product_id in product_ids.iter().cloned() {
      let tx = tx.clone();
      let ctx = ctx.clone();
      let resolver = self.resolver.clone();

      tasks.spawn(async move {
        if let Some(err) = ctx.err() {
          tracing::debug!(path, product_id = %product_id, error = %err, "context done, skipping");
          return;
        }

        let request_id = ctx.request_id.clone();
        match resolver.resolve(ctx, &product_id).await {
          Ok(product) => {
            let _ = tx.send(product).await;
          }
          Err(err) => {
            let product_id = product_id.as_str();
            tracing::warn!(
              path,
              request_id = %request_id,
              product_id,
              error = %err,
              "dropping unresolved item"
            );
          }
        }
      });
    }
    drop(tx);

    let mut items = Vec::with_capacity(product_ids.len());
    while let Some(product) = rx.recv().await {
      items.push(product);
    }

    while let Some(res) = tasks.join_next().await {
      if let Err(err) = res {
        tracing::error!(path, error = %err, "wishlist item task failed");
      }
    }

    items
  }
}
