use std::fs;

use crate::models::{
  config::Config,
  errors::{ErrorType, InternalError},
};
use crate::server::Server;

impl Server {
  pub(super) fn load_config(path: &str) -> Result<Config, InternalError> {
    let mk_err = |msg: &str, err: Box<dyn std::error::Error + Send + Sync>| InternalError {
      temp: false,
      err_type: ErrorType::Internal,
      err,
      msg: msg.to_string(),
      path: "wishlists.server.load_config".into(),
    };

    let yaml_string = fs::read_to_string(path)
      .map_err(|e| mk_err("failed to load service config file", Box::new(e)))?;

    serde_yaml::from_str::<Config>(&yaml_string)
      .map_err(|e| mk_err("failed to parse config data", Box::new(e)))
  }
}
