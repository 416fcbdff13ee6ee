use std::sync::Arc;

use sqlx::query;

use crate::{
  models::{context::Context, errors::StoreError, products::Product},
  store::database::{
    dbstore::{product_from_row, ProductsStoreImpl, PRODUCT_COLUMNS},
    errors::handle_db_error,
  },
};

pub(super) async fn product_list(
  s: &ProductsStoreImpl,
  _: Arc<Context>,
  count: u32,
  offset: u32,
) -> Result<Option<Vec<Product>>, StoreError> {
  let path = "wishlists.store.product_list";
  let sql = format!(
    r#"
      SELECT {}
      FROM products
      WHERE deleted_at IS NULL
      ORDER BY created_at DESC, id
      LIMIT $1 OFFSET $2
    "#,
    PRODUCT_COLUMNS
  );

  let rows = query(&sql)
    .bind(count as i64)
    .bind(offset as i64)
    .fetch_all(s.db.as_ref())
    .await
    .map_err(|err| handle_db_error(err, path))?;

  let products =
    rows.iter().map(|row| product_from_row(row, path)).collect::<Result<Vec<Product>, _>>()?;

  Ok(into_page(products))
}

// An empty page means the replica has nothing for this window.
fn into_page(products: Vec<Product>) -> Option<Vec<Product>> {
  if products.is_empty() { None } else { Some(products) }
}
