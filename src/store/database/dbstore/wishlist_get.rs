use std::sync::Arc;

use sqlx::{query, Row};

use crate::{
  models::{context::Context, errors::StoreError, wishlists::Wishlist},
  store::database::{dbstore::WishlistsStoreImpl, errors::handle_db_error},
};

pub(super) async fn wishlist_get(
  s: &WishlistsStoreImpl,
  _: Arc<Context>,
  id: &str,
) -> Result<Wishlist, StoreError> {
  let path = "wishlists.store.wishlist_get";

  let row = query("SELECT id, customer_id, title FROM wishlists WHERE id = $1")
    .bind(id)
    .fetch_one(s.db.as_ref())
    .await
    .map_err(|err| handle_db_error(err, path))?;

  let items: Vec<String> = query(
    r#"
      SELECT product_id
      FROM wishlist_items
      WHERE wishlist_id = $1
      ORDER BY position
    "#,
  )
  .bind(id)
  .fetch_all(s.db.as_ref())
  .await
  .map_err(|err| handle_db_error(err, path))?
  .iter()
  .map(|r| r.try_get("product_id"))
  .collect::<Result<Vec<String>, sqlx::Error>>()
  .map_err(|err| handle_db_error(err, path))?;

  Ok(Wishlist {
    id: row.try_get("id").map_err(|err| handle_db_error(err, path))?,
    customer_id: row.try_get("customer_id").map_err(|err| handle_db_error(err, path))?,
    title: row.try_get("title").map_err(|err| handle_db_error(err, path))?,
    items,
  })
}
