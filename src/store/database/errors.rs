use std::sync::LazyLock;

use regex::Regex;
use sqlx::error::Error as SqlxError;
use sqlx::postgres::PgDatabaseError;

use crate::models::errors::{ErrorType, StoreError};

static COLUMN_NAME: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"column "(.+?)""#).expect("valid column regex"));

pub fn handle_db_error(err: SqlxError, path: &str) -> StoreError {
  match err {
    SqlxError::Database(db_err) => {
      let pg_err = db_err.downcast_ref::<PgDatabaseError>();

      let details = pg_err.detail().unwrap_or("").to_string();
      let (err_type, msg) = match pg_err.code() {
        "23505" => (ErrorType::UniqueViolation, parse_duplicate_field_db_error(pg_err)),
        "23503" => (ErrorType::ForeignKeyViolation, "referenced record is not found".to_string()),
        "23502" => {
          (ErrorType::NotNullViolation, format!("{} cannot be null", parse_db_field_name(pg_err)))
        }
        "08000" | "08003" | "08006" => {
          (ErrorType::Connection, "database connection exception".to_string())
        }
        "42501" => {
          (ErrorType::Privileges, "insufficient permissions to perform an action".to_string())
        }
        _ => (ErrorType::Internal, "database error".to_string()),
      };

      StoreError::new(err_type, Some(Box::new(SqlxError::Database(db_err))), msg, path, details)
    }

    SqlxError::RowNotFound => StoreError::new(
      ErrorType::NoRows,
      Some(Box::new(SqlxError::RowNotFound)),
      "the requested resource is not found",
      path,
      "",
    ),

    SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => StoreError::new(
      ErrorType::Connection,
      Some(Box::new(err)),
      "database connection exception",
      path,
      "",
    ),

    _ => StoreError::new(ErrorType::Internal, Some(Box::new(err)), "database error", path, ""),
  }
}

// Example: "Key (email)=(test@example.com) already exists."
fn parse_duplicate_field_db_error(err: &PgDatabaseError) -> String {
  if let Some(detail) = err.detail() {
    if let Some(parts) = detail.split(")=(").next() {
      let field = parts.trim_start_matches("Key (");
      return format!("{} already exists", field);
    }
  }
  err.detail().unwrap_or("").to_string()
}

// Example: "null value in column \"email\" violates not-null constraint"
fn parse_db_field_name(err: &PgDatabaseError) -> String {
  if let Some(captures) = COLUMN_NAME.captures(err.message()) {
    if let Some(match_) = captures.get(1) {
      return match_.as_str().to_string();
    }
  }
  "field".to_string()
}
