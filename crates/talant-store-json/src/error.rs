//! Error type for `talant-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] talant_core::Error),

  #[error("io error on {}: {}", .path.display(), .source)]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("password error: {0}")]
  Password(#[from] talant_auth::PasswordError),

  #[error("blocking task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
    let path = path.into();
    move |source| Error::Io { path, source }
  }
}

/// Domain errors pass through unchanged; everything else is a persistence
/// failure.
impl From<Error> for talant_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(core) => core,
      other => talant_core::Error::Persistence(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
