use std::sync::Arc;

use crate::{
  models::{context::Context, errors::StoreError, products::Product, wishlists::Wishlist},
  store::database::{
    dbstore::{
      product_delete::product_delete, product_get::product_get, product_list::product_list,
      product_upsert::product_upsert, wishlist_get::wishlist_get,
      wishlists_by_customer::wishlists_by_customer, ProductsStoreImpl, WishlistsStoreImpl,
    },
    ProductReplica, ProductSource, WishlistsStore,
  },
};

#[tonic::async_trait]
impl ProductSource for ProductsStoreImpl {
  async fn get_by_id(&self, ctx: Arc<Context>, id: &str) -> Result<Option<Product>, StoreError> {
    product_get(self, ctx, id).await
  }
  async fn list(
    &self,
    ctx: Arc<Context>,
    count: u32,
    offset: u32,
  ) -> Result<Option<Vec<Product>>, StoreError> {
    product_list(self, ctx, count, offset).await
  }
}

#[tonic::async_trait]
impl ProductReplica for ProductsStoreImpl {
  async fn upsert(&self, ctx: Arc<Context>, product: &Product) -> Result<(), StoreError> {
    product_upsert(self, ctx, product).await
  }
  async fn delete(&self, ctx: Arc<Context>, id: &str) -> Result<(), StoreError> {
    product_delete(self, ctx, id).await
  }
}

#[tonic::async_trait]
impl WishlistsStore for WishlistsStoreImpl {
  async fn get_by_id(&self, ctx: Arc<Context>, id: &str) -> Result<Wishlist, StoreError> {
    wishlist_get(self, ctx, id).await
  }
  async fn get_by_customer_id(
    &self,
    ctx: Arc<Context>,
    customer_id: &str,
  ) -> Result<Vec<Wishlist>, StoreError> {
    wishlists_by_customer(self, ctx, customer_id).await
  }
}
