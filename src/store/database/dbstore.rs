mod product_delete;
mod product_get;
mod product_list;
mod product_upsert;
mod router;
mod wishlist_get;
mod wishlists_by_customer;

use std::sync::Arc;

use serde_json::from_value;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::models::{
  errors::{ErrorType, StoreError},
  products::{Product, ProductRating},
};

const PRODUCT_COLUMNS: &str = r#"
  id, name, description, price, category, images,
  rating_average, rating_count, created_at, updated_at, deleted_at
"#;

/// Postgres replica of the catalog.
#[derive(Debug)]
pub struct ProductsStoreImpl {
  pub(crate) db: Arc<Pool<Postgres>>,
}

#[derive(Debug)]
pub struct ProductsStoreImplArgs {
  pub db: Arc<Pool<Postgres>>,
}

impl ProductsStoreImpl {
  pub fn new(args: ProductsStoreImplArgs) -> Self {
    Self { db: args.db }
  }
}

#[derive(Debug)]
pub struct WishlistsStoreImpl {
  pub(crate) db: Arc<Pool<Postgres>>,
}

#[derive(Debug)]
pub struct WishlistsStoreImplArgs {
  pub db: Arc<Pool<Postgres>>,
}

impl WishlistsStoreImpl {
  pub fn new(args: WishlistsStoreImplArgs) -> Self {
    Self { db: args.db }
  }
}

pub(super) fn product_from_row(row: &PgRow, path: &str) -> Result<Product, StoreError> {
  let de = |err: sqlx::Error, msg: &str| {
    StoreError::new(ErrorType::Internal, Some(Box::new(err)), msg, path, "")
  };

  let images: Vec<String> = from_value(row.try_get("images").map_err(|e| de(e, "missing images"))?)
    .map_err(|err| {
      StoreError::new(
        ErrorType::JsonUnmarshal,
        Some(Box::new(err)),
        "failed to deserialize images",
        path,
        "",
      )
    })?;

  let rating_average: Option<f64> =
    row.try_get("rating_average").map_err(|e| de(e, "invalid rating_average"))?;
  let rating_count: Option<i64> =
    row.try_get("rating_count").map_err(|e| de(e, "invalid rating_count"))?;
  let rating = match (rating_average, rating_count) {
    (Some(average), Some(count)) => Some(ProductRating { average, count }),
    _ => None,
  };

  Ok(Product {
    id: row.try_get("id").map_err(|e| de(e, "invalid id"))?,
    name: row.try_get("name").map_err(|e| de(e, "invalid name"))?,
    description: row.try_get("description").map_err(|e| de(e, "invalid description"))?,
    price: row.try_get("price").map_err(|e| de(e, "invalid price"))?,
    category: row.try_get("category").map_err(|e| de(e, "invalid category"))?,
    images,
    rating,
    created_at: row.try_get("created_at").map_err(|e| de(e, "invalid created_at"))?,
    updated_at: row.try_get("updated_at").map_err(|e| de(e, "invalid updated_at"))?,
    deleted_at: row.try_get("deleted_at").map_err(|e| de(e, "invalid deleted_at"))?,
  })
}
