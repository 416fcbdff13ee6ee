use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
  pub service: ServiceConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  pub catalog: CatalogConfig,
  pub database: DatabaseConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServiceConfig {
  pub env: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CacheConfig {
  /// Redis connection string. The in-process cache is used when absent.
  #[serde(default)]
  pub redis_url: Option<String>,
  #[serde(default = "default_product_ttl_seconds")]
  pub product_ttl_seconds: u64,
  #[serde(default = "default_pool_size")]
  pub pool_size: usize,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CatalogConfig {
  pub base_url: String,
  #[serde(default = "default_request_timeout_ms")]
  pub request_timeout_ms: u64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DatabaseConfig {
  pub data_source: String,
  pub max_open_conns: u32,
  pub max_idle_conns: u32,
  pub conn_max_lifetime_milliseconds: u64,
  pub conn_max_idle_time_milliseconds: u64,
}

fn default_product_ttl_seconds() -> u64 {
  300
}

fn default_pool_size() -> usize {
  16
}

fn default_request_timeout_ms() -> u64 {
  5000
}

impl Default for CacheConfig {
  fn default() -> Self {
    CacheConfig {
      redis_url: None,
      product_ttl_seconds: default_product_ttl_seconds(),
      pool_size: default_pool_size(),
    }
  }
}
