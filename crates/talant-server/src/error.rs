//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  extract::rejection::FormRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized: {0}")]
  Unauthorized(String),
  #[error("forbidden: {0}")]
  Forbidden(String),
  #[error("not found: {0}")]
  NotFound(String),
  #[error("conflict: {0}")]
  Conflict(String),
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Missing, expired or forged session.
  pub fn no_session() -> Self { Error::Unauthorized("missing or invalid session".to_string()) }
}

impl From<talant_core::Error> for Error {
  fn from(e: talant_core::Error) -> Self {
    use talant_core::Error as Core;
    match e {
      Core::Validation(msg) => Error::BadRequest(msg),
      Core::InvalidCredentials => Error::Unauthorized(e.to_string()),
      Core::NotFound { .. } => Error::NotFound(e.to_string()),
      Core::NotOwner { .. } => Error::Forbidden(e.to_string()),
      Core::DuplicateIdentity | Core::AlreadyExists(_) => Error::Conflict(e.to_string()),
      Core::Persistence(inner) => Error::Internal(inner),
    }
  }
}

/// Malformed form bodies and a wrong content type are plain bad requests.
impl From<FormRejection> for Error {
  fn from(e: FormRejection) -> Self { Error::BadRequest(e.body_text()) }
}

impl From<talant_auth::TokenError> for Error {
  fn from(e: talant_auth::TokenError) -> Self { Error::Internal(Box::new(e)) }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      Error::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
      Error::Forbidden(m) => (StatusCode::FORBIDDEN, m),
      Error::NotFound(m) => (StatusCode::NOT_FOUND, m),
      Error::Conflict(m) => (StatusCode::CONFLICT, m),
      Error::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      Error::Internal(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
