mod products;
mod wire;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::models::errors::{BoxedErr, ErrorType, StoreError};

/// HTTP client for the authoritative product catalog service.
#[derive(Debug, Clone)]
pub struct CatalogClient {
  pub(crate) client: Client,
  pub(crate) base_url: Url,
}

#[derive(Debug)]
pub struct CatalogClientArgs {
  pub base_url: String,
  pub request_timeout: Duration,
}

impl CatalogClient {
  pub fn new(args: CatalogClientArgs) -> Result<Self, StoreError> {
    let path = "wishlists.catalog.new";
    let mk_err = |msg: &str, err: BoxedErr, details: &str| {
      StoreError::new(ErrorType::Internal, Some(err), msg, path, details)
    };

    let base_url = Url::parse(&args.base_url)
      .map_err(|e| mk_err("invalid catalog url", Box::new(e), &args.base_url))?;

    let client = Client::builder()
      .timeout(args.request_timeout)
      .build()
      .map_err(|e| mk_err("failed to build http client", Box::new(e), ""))?;

    Ok(Self { client, base_url })
  }

  pub(crate) fn endpoint(&self, segments: &[&str], path: &str) -> Result<Url, StoreError> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| {
        let msg = "catalog url cannot be a base";
        StoreError::new(ErrorType::Internal, None, msg, path, self.base_url.as_str())
      })?
      .pop_if_empty()
      .extend(segments);

    Ok(url)
  }
}

pub(crate) async fn decode<T: DeserializeOwned>(
  res: Response,
  path: &str,
) -> Result<T, StoreError> {
  let status = res.status();
  if status == StatusCode::NOT_FOUND {
    return Err(StoreError::new(
      ErrorType::NotFound,
      None,
      "the requested resource is not found in the catalog",
      path,
      res.url().as_str(),
    ));
  }

  if !status.is_success() {
    return Err(StoreError::new(
      ErrorType::HttpResponse,
      None,
      format!("catalog responded with {}", status),
      path,
      res.url().as_str(),
    ));
  }

  let body = res.bytes().await.map_err(|e| {
    let msg = "failed to read catalog response";
    StoreError::new(ErrorType::Connection, Some(Box::new(e)), msg, path, "")
  })?;

  serde_json::from_slice(&body).map_err(|e| {
    let msg = "failed to decode catalog response";
    StoreError::new(ErrorType::JsonUnmarshal, Some(Box::new(e)), msg, path, "")
  })
}

pub(crate) fn transport_error(err: reqwest::Error, path: &str) -> StoreError {
  let details = err.url().map(|u| u.to_string()).unwrap_or_default();
  let msg = "catalog request failed";
  StoreError::new(ErrorType::Connection, Some(Box::new(err)), msg, path, details)
}
