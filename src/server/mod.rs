mod cache;
mod config;
mod database;
mod getters;

use std::{error::Error, sync::Arc, time::Duration};

use sqlx::{Pool, Postgres};

use crate::aggregator::{ConcurrentAggregator, ConcurrentAggregatorArgs};
use crate::catalog::{CatalogClient, CatalogClientArgs};
use crate::models::config::Config;
use crate::models::errors::{ErrorType, InternalError};
use crate::resolver::{
  ProductListResolver, ProductListResolverArgs, ProductResolver, ProductResolverArgs,
};
use crate::store::database::dbstore::{
  ProductsStoreImpl, ProductsStoreImplArgs, WishlistsStoreImpl, WishlistsStoreImplArgs,
};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const CONFIG_PATH_ENV: &str = "WISHLISTS_CONFIG";

/// Composition root: owns the connections and the resolution components built on
/// top of them.
pub struct Server {
  pub(crate) config: Config,
  pub(crate) db: Arc<Pool<Postgres>>,
  pub(crate) product_resolver: Arc<ProductResolver>,
  pub(crate) product_list_resolver: Arc<ProductListResolver>,
  pub(crate) aggregator: Arc<ConcurrentAggregator>,
}

#[derive(Debug)]
pub struct ServerArgs {
  pub config_path: String,
}

impl Default for ServerArgs {
  fn default() -> Self {
    let config_path =
      std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    Self { config_path }
  }
}

impl Server {
  pub async fn new(args: ServerArgs) -> Result<Self, Box<dyn Error>> {
    let config = Self::load_config(&args.config_path)?;
    let db = Arc::new(Self::init_database(&config.database).await?);
    let cache = Self::init_cache(&config.cache).await?;

    let catalog_args = CatalogClientArgs {
      base_url: config.catalog.base_url.clone(),
      request_timeout: Duration::from_millis(config.catalog.request_timeout_ms),
    };
    let catalog = Arc::new(CatalogClient::new(catalog_args).map_err(|e| InternalError {
      temp: false,
      err_type: ErrorType::Internal,
      err: Box::new(e),
      msg: "failed to initialize catalog client".into(),
      path: "wishlists.server.new".into(),
    })?);

    let replica = Arc::new(ProductsStoreImpl::new(ProductsStoreImplArgs { db: db.clone() }));
    let wishlists = Arc::new(WishlistsStoreImpl::new(WishlistsStoreImplArgs { db: db.clone() }));
    let ttl = Duration::from_secs(config.cache.product_ttl_seconds);

    let product_resolver = Arc::new(ProductResolver::new(ProductResolverArgs {
      cache: cache.clone(),
      service: catalog.clone(),
      replica: replica.clone(),
      ttl,
    }));

    let product_list_resolver = Arc::new(ProductListResolver::new(ProductListResolverArgs {
      cache,
      service: catalog,
      replica,
      ttl,
    }));

    let aggregator = Arc::new(ConcurrentAggregator::new(ConcurrentAggregatorArgs {
      resolver: product_resolver.clone(),
      wishlists,
    }));

    Ok(Self { config, db, product_resolver, product_list_resolver, aggregator })
  }

  pub async fn run(&self) -> Result<(), Box<dyn Error>> {
    tracing::info!(env = %self.config.service.env, "wishlists product resolution is ready");

    tokio::signal::ctrl_c().await.map_err(|e| InternalError {
      temp: false,
      err_type: ErrorType::Internal,
      err: Box::new(e),
      msg: "failed to listen for shutdown signal".into(),
      path: "wishlists.server.run".into(),
    })?;

    tracing::info!("shutting down");
    self.db.close().await;
    Ok(())
  }
}
