use std::{collections::HashMap, sync::Arc};

use sqlx::{query, Row};

use crate::{
  models::{context::Context, errors::StoreError, wishlists::Wishlist},
  store::database::{dbstore::WishlistsStoreImpl, errors::handle_db_error},
};

pub(super) async fn wishlists_by_customer(
  s: &WishlistsStoreImpl,
  _: Arc<Context>,
  customer_id: &str,
) -> Result<Vec<Wishlist>, StoreError> {
  let path = "wishlists.store.wishlists_by_customer";
  let de = |err: sqlx::Error| handle_db_error(err, path);

  let rows = query(
    r#"
      SELECT id, customer_id, title
      FROM wishlists
      WHERE customer_id = $1
      ORDER BY created_at, id
    "#,
  )
  .bind(customer_id)
  .fetch_all(s.db.as_ref())
  .await
  .map_err(de)?;

  let mut wishlists = rows
    .iter()
    .map(|row| {
      Ok(Wishlist {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        title: row.try_get("title")?,
        items: vec![],
      })
    })
    .collect::<Result<Vec<Wishlist>, sqlx::Error>>()
    .map_err(de)?;

  if wishlists.is_empty() {
    return Ok(wishlists);
  }

  let ids: Vec<String> = wishlists.iter().map(|w| w.id.clone()).collect();
  let item_rows = query(
    r#"
      SELECT wishlist_id, product_id
      FROM wishlist_items
      WHERE wishlist_id = ANY($1)
      ORDER BY wishlist_id, position
    "#,
  )
  .bind(&ids)
  .fetch_all(s.db.as_ref())
  .await
  .map_err(de)?;

  let mut items: HashMap<String, Vec<String>> = HashMap::with_capacity(ids.len());
  for row in item_rows {
    let wishlist_id: String = row.try_get("wishlist_id").map_err(de)?;
    let product_id: String = row.try_get("product_id").map_err(de)?;
    items.entry(wishlist_id).or_default().push(product_id);
  }

  for wishlist in wishlists.iter_mut() {
    wishlist.items = items.remove(&wishlist.id).unwrap_or_default();
  }

  Ok(wishlists)
}
