use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::{de, Deserialize, Deserializer};

use crate::models::products::{Product, ProductRating};

/// Product as served by the catalog service. Ids come back as numbers from the
/// public catalog and as strings from internal mirrors of it.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogProduct {
  id: CatalogId,
  title: String,
  #[serde(default)]
  description: String,
  #[serde(deserialize_with = "decimal_from_text")]
  price: BigDecimal,
  #[serde(default)]
  category: String,
  #[serde(default)]
  image: Option<String>,
  #[serde(default)]
  rating: Option<CatalogRating>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogId {
  Number(i64),
  Text(String),
}

#[derive(Debug, Deserialize)]
struct CatalogRating {
  rate: f64,
  count: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
  Number(serde_json::Number),
  Text(String),
}

// Builds the decimal from the number's shortest text form, not from its f64 value.
fn decimal_from_text<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
  D: Deserializer<'de>,
{
  let text = match RawDecimal::deserialize(deserializer)? {
    RawDecimal::Number(n) => n.to_string(),
    RawDecimal::Text(s) => s,
  };
  BigDecimal::from_str(text.trim()).map_err(de::Error::custom)
}

impl From<CatalogProduct> for Product {
  fn from(p: CatalogProduct) -> Self {
    let id = match p.id {
      CatalogId::Number(n) => n.to_string(),
      CatalogId::Text(s) => s,
    };

    let now = Utc::now();
    Product {
      id,
      name: p.title,
      description: p.description,
      price: p.price,
      category: p.category,
      images: p.image.into_iter().filter(|img| !img.is_empty()).collect(),
      rating: p.rating.map(|r| ProductRating { average: r.rate, count: r.count }),
      created_at: now,
      updated_at: now,
      deleted_at: None,
    }
  }
}
