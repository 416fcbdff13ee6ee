use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::products::Product;

/// Wishlist as stored by the wishlist repository: product ids only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
  pub id: String,
  pub customer_id: String,
  pub title: String,
  pub items: Vec<String>,
}

/// Customer fields that are safe to hand back to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingCustomer {
  pub id: String,
  pub name: String,
  pub email: String,
  pub created_at: DateTime<Utc>,
}

/// Read model: a wishlist with its product ids resolved. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FulfilledWishlist {
  pub id: String,
  pub customer: OutgoingCustomer,
  pub title: String,
  pub items: Vec<Product>,
}
