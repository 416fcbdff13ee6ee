use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::aggregator::ConcurrentAggregator;
use crate::models::config::Config;
use crate::resolver::{ProductListResolver, ProductResolver};
use crate::server::Server;

impl Server {
  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn db(&self) -> Arc<Pool<Postgres>> {
    self.db.clone()
  }

  pub fn product_resolver(&self) -> Arc<ProductResolver> {
    self.product_resolver.clone()
  }

  pub fn product_list_resolver(&self) -> Arc<ProductListResolver> {
    self.product_list_resolver.clone()
  }

  pub fn aggregator(&self) -> Arc<ConcurrentAggregator> {
    self.aggregator.clone()
  }
}
