use std::sync::Arc;

use crate::{
  models::{context::Context, errors::StoreError},
  store::database::{dbstore::ProductsStoreImpl, errors::handle_db_error},
};

// Soft delete: the row stays readable as a tombstone.
pub(super) async fn product_delete(
  s: &ProductsStoreImpl,
  _: Arc<Context>,
  id: &str,
) -> Result<(), StoreError> {
  sqlx::query(
    r#"
      UPDATE products
      SET deleted_at = COALESCE(deleted_at, now()), updated_at = now()
      WHERE id = $1
    "#,
  )
  .bind(id)
  .execute(s.db.as_ref())
  .await
  .map_err(|e| handle_db_error(e, "wishlists.store.product_delete"))?;

  Ok(())
}
