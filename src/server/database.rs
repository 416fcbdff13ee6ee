use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::models::{
  config::DatabaseConfig,
  errors::{ErrorType, InternalError},
};
use crate::server::Server;

impl Server {
  pub(super) async fn init_database(cfg: &DatabaseConfig) -> Result<Pool<Postgres>, InternalError> {
    PgPoolOptions::new()
      .max_connections(cfg.max_open_conns)
      .min_connections(cfg.max_idle_conns)
      .max_lifetime(Duration::from_millis(cfg.conn_max_lifetime_milliseconds))
      .idle_timeout(Duration::from_millis(cfg.conn_max_idle_time_milliseconds))
      .connect(&cfg.data_source)
      .await
      .map_err(|e| InternalError {
        temp: false,
        err_type: ErrorType::Connection,
        err: Box::new(e),
        msg: "failed to connect to database".into(),
        path: "wishlists.server.init_database".into(),
      })
  }
}
