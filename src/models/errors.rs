use std::{error::Error, fmt};

use derive_more::Display;
use thiserror::Error as ThisError;
use tonic::Code;

use crate::models::context::ContextError;

pub type BoxedErr = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
  NoRows,
  NotFound,
  UniqueViolation,
  ForeignKeyViolation,
  NotNullViolation,
  JsonMarshal,
  JsonUnmarshal,
  Connection,
  Privileges,
  HttpResponse,
  Cancelled,
  Internal,
}

impl fmt::Display for ErrorType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorType::NoRows => write!(f, "no_rows"),
      ErrorType::NotFound => write!(f, "not_found"),
      ErrorType::UniqueViolation => write!(f, "unique_violation"),
      ErrorType::ForeignKeyViolation => write!(f, "foreign_key_violation"),
      ErrorType::NotNullViolation => write!(f, "not_null_violation"),
      ErrorType::JsonMarshal => write!(f, "json_marshal"),
      ErrorType::JsonUnmarshal => write!(f, "json_unmarshal"),
      ErrorType::Connection => write!(f, "connection_exception"),
      ErrorType::Privileges => write!(f, "insufficient_privilege"),
      ErrorType::HttpResponse => write!(f, "http_response_error"),
      ErrorType::Cancelled => write!(f, "cancelled"),
      ErrorType::Internal => write!(f, "internal_error"),
    }
  }
}

#[derive(Debug, Display)]
#[display("InternalError: {} {} {} {}", temp, err, msg, path)]
pub struct InternalError {
  pub temp: bool,
  pub err_type: ErrorType,
  pub err: BoxedErr,
  pub msg: String,
  pub path: String,
}

impl Error for InternalError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(&*self.err)
  }
}

/// Error shared by every collaborator of the resolution layer: the cache, the
/// catalog client, the replica and the wishlist repository.
#[derive(Debug)]
pub struct StoreError {
  pub err_type: ErrorType,
  pub err: Option<BoxedErr>,
  pub msg: String,
  pub path: String,
  pub details: String,
}

impl StoreError {
  pub fn new(
    err_type: ErrorType,
    err: Option<BoxedErr>,
    msg: impl Into<String>,
    path: impl Into<String>,
    details: impl Into<String>,
  ) -> Self {
    Self { err_type, err, msg: msg.into(), path: path.into(), details: details.into() }
  }

  /// The error-kind check the resolvers use to tell an authoritative absence apart
  /// from an infrastructure failure.
  pub fn is_not_found(&self) -> bool {
    matches!(self.err_type, ErrorType::NotFound | ErrorType::NoRows)
  }
}

impl fmt::Display for StoreError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut parts = Vec::new();

    if !self.path.is_empty() {
      parts.push(format!("path: {}", self.path));
    }

    parts.push(format!("err_type: {}", self.err_type));

    if !self.msg.is_empty() {
      parts.push(format!("msg: {}", self.msg));
    }

    if !self.details.is_empty() {
      parts.push(format!("details: {}", self.details));
    }

    if let Some(ref err) = self.err {
      parts.push(format!("err: {}", err));
    }

    write!(f, "{}", parts.join(", "))
  }
}

impl Error for StoreError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    self.err.as_ref().map(|e| &**e as &dyn Error)
  }
}

impl From<ContextError> for StoreError {
  fn from(err: ContextError) -> Self {
    StoreError::new(ErrorType::Cancelled, Some(Box::new(err)), "context is done", "", "")
  }
}

#[derive(Debug, ThisError)]
pub enum ResolveError {
  #[error("invalid or missing field: {field}")]
  Validation { field: String },

  #[error("not found: {0}")]
  NotFound(String),

  #[error("error fetching from database: {0}")]
  Database(StoreError),

  #[error(transparent)]
  Context(#[from] ContextError),

  #[error(transparent)]
  Store(StoreError),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ResolveError {
  pub fn validation(field: impl Into<String>) -> Self {
    ResolveError::Validation { field: field.into() }
  }

  /// Status code for the transport layer sitting on top of this crate.
  pub fn code(&self) -> Code {
    match self {
      ResolveError::Validation { .. } => Code::InvalidArgument,
      ResolveError::NotFound(_) => Code::NotFound,
      ResolveError::Context(ContextError::Cancelled) => Code::Cancelled,
      ResolveError::Context(ContextError::DeadlineExceeded) => Code::DeadlineExceeded,
      ResolveError::Store(err) if err.is_not_found() => Code::NotFound,
      ResolveError::Database(_) | ResolveError::Store(_) | ResolveError::Internal(_) => {
        Code::Internal
      }
    }
  }
}
