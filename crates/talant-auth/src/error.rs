//! Error types for `talant-auth`.

use thiserror::Error;

/// Why a session token was not accepted (or could not be minted).
#[derive(Debug, Error)]
pub enum TokenError {
  /// Not a well-formed token, or its claims are missing or inconsistent.
  #[error("invalid token")]
  Invalid,

  #[error("token expired")]
  Expired,

  /// Signature mismatch, or signed with an algorithm other than HS256.
  #[error("bad token signature")]
  BadSignature,

  #[error("token encoding failed: {0}")]
  Encode(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
  fn from(e: jsonwebtoken::errors::Error) -> Self {
    use jsonwebtoken::errors::ErrorKind;
    match e.kind() {
      ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
        TokenError::BadSignature
      }
      ErrorKind::ExpiredSignature => TokenError::Expired,
      _ => TokenError::Invalid,
    }
  }
}

#[derive(Debug, Error)]
pub enum PasswordError {
  #[error("argon2 error: {0}")]
  Hash(String),
}
