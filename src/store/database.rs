pub mod dbstore;
pub mod errors;

use std::{fmt, sync::Arc};

use crate::models::{
  context::Context,
  errors::StoreError,
  products::Product,
  wishlists::Wishlist,
};

/// Read access to product data. Implemented by both the remote catalog client and
/// the local replica, which the resolvers receive positionally.
#[tonic::async_trait]
pub trait ProductSource: fmt::Debug + Send + Sync {
  async fn get_by_id(&self, ctx: Arc<Context>, id: &str) -> Result<Option<Product>, StoreError>;
  async fn list(
    &self,
    ctx: Arc<Context>,
    count: u32,
    offset: u32,
  ) -> Result<Option<Vec<Product>>, StoreError>;
}

/// The locally persisted mirror of the catalog.
#[tonic::async_trait]
pub trait ProductReplica: ProductSource {
  async fn upsert(&self, ctx: Arc<Context>, product: &Product) -> Result<(), StoreError>;
  async fn delete(&self, ctx: Arc<Context>, id: &str) -> Result<(), StoreError>;
}

#[tonic::async_trait]
pub trait WishlistsStore: fmt::Debug + Send + Sync {
  async fn get_by_id(&self, ctx: Arc<Context>, id: &str) -> Result<Wishlist, StoreError>;
  async fn get_by_customer_id(
    &self,
    ctx: Arc<Context>,
    customer_id: &str,
  ) -> Result<Vec<Wishlist>, StoreError>;
}
