use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRating {
  pub average: f64,
  pub count: i64,
}

/// Catalog product as mirrored by the replica and the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: String,
  pub name: String,
  pub description: String,
  pub price: BigDecimal,
  pub category: String,
  #[serde(default)]
  pub images: Vec<String>,
  #[serde(default)]
  pub rating: Option<ProductRating>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  #[serde(default)]
  pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
  pub fn is_deleted(&self) -> bool {
    self.deleted_at.is_some()
  }
}
