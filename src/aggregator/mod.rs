mod wishlist;
mod wishlists;

use std::sync::Arc;

use crate::{resolver::ProductResolver, store::database::WishlistsStore};

/// Builds fulfilled wishlists by resolving every item concurrently, one task per
/// product id.
///
/// Displaying a single wishlist drops items that fail to resolve. Listing all of a
/// customer's wishlists fails as a whole on the first item error.
#[derive(Debug, Clone)]
pub struct ConcurrentAggregator {
  resolver: Arc<ProductResolver>,
  wishlists: Arc<dyn WishlistsStore>,
}

#[derive(Debug)]
pub struct ConcurrentAggregatorArgs {
  pub resolver: Arc<ProductResolver>,
  pub wishlists: Arc<dyn WishlistsStore>,
}

impl ConcurrentAggregator {
  pub fn new(args: ConcurrentAggregatorArgs) -> Self {
    Self { resolver: args.resolver, wishlists: args.wishlists }
  }
}
