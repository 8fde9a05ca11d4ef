//! Error types for `talant-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid input: {0}")]
  Validation(String),

  #[error("username or email already exists")]
  DuplicateIdentity,

  /// Returned for both an unknown login and a wrong password.
  #[error("invalid username or password")]
  InvalidCredentials,

  #[error("{kind} not found: {id}")]
  NotFound { kind: &'static str, id: Uuid },

  #[error("{kind} {id} belongs to another user")]
  NotOwner { kind: &'static str, id: Uuid },

  #[error("user already has a {0}")]
  AlreadyExists(&'static str),

  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
