use std::sync::Arc;

use serde_json::to_value;

use crate::{
  models::{
    context::Context,
    errors::{ErrorType, StoreError},
    products::Product,
  },
  store::database::{dbstore::ProductsStoreImpl, errors::handle_db_error},
};

// created_at keeps the time the product was first mirrored.
const UPSERT_PRODUCT: &str = r#"
  INSERT INTO products (
    id, name, description, price, category, images,
    rating_average, rating_count, created_at, updated_at, deleted_at
  ) VALUES (
    $1, $2, $3, $4, $5, $6,
    $7, $8, $9, $10, $11
  )
  ON CONFLICT (id) DO UPDATE SET
    name = EXCLUDED.name,
    description = EXCLUDED.description,
    price = EXCLUDED.price,
    category = EXCLUDED.category,
    images = EXCLUDED.images,
    rating_average = EXCLUDED.rating_average,
    rating_count = EXCLUDED.rating_count,
    updated_at = EXCLUDED.updated_at,
    deleted_at = EXCLUDED.deleted_at
"#;

pub(super) async fn product_upsert(
  s: &ProductsStoreImpl,
  _: Arc<Context>,
  pro: &Product,
) -> Result<(), StoreError> {
  let path = "wishlists.store.product_upsert";

  let images_json = to_value(&pro.images).map_err(|e| {
    StoreError::new(
      ErrorType::JsonMarshal,
      Some(Box::new(e)),
      "failed to serialize the product images",
      path,
      "",
    )
  })?;

  sqlx::query(UPSERT_PRODUCT)
    .bind(&pro.id)
    .bind(&pro.name)
    .bind(&pro.description)
    .bind(&pro.price)
    .bind(&pro.category)
    .bind(images_json)
    .bind(pro.rating.as_ref().map(|r| r.average))
    .bind(pro.rating.as_ref().map(|r| r.count))
    .bind(pro.created_at)
    .bind(pro.updated_at)
    .bind(pro.deleted_at)
    .execute(s.db.as_ref())
    .await
    .map_err(|e| handle_db_error(e, path))?;

  Ok(())
}
