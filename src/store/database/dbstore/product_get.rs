use std::sync::Arc;

use sqlx::query;

use crate::{
  models::{context::Context, errors::StoreError, products::Product},
  store::database::{
    dbstore::{product_from_row, ProductsStoreImpl, PRODUCT_COLUMNS},
    errors::handle_db_error,
  },
};

// Soft deleted rows are returned too, callers render them as placeholders.
pub(super) async fn product_get(
  s: &ProductsStoreImpl,
  _: Arc<Context>,
  id: &str,
) -> Result<Option<Product>, StoreError> {
  let path = "wishlists.store.product_get";
  let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);

  let row = query(&sql)
    .bind(id)
    .fetch_optional(s.db.as_ref())
    .await
    .map_err(|err| handle_db_error(err, path))?;

  row.map(|r| product_from_row(&r, path)).transpose()
}
