//! HTTP layer for Talant.
//!
//! Exposes an axum [`Router`] with the session and record endpoints, backed
//! by any [`Store`]. Sessions travel in an `HttpOnly` cookie holding a signed
//! token; see [`auth`].

pub mod auth;
pub mod cors;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use chrono::TimeDelta;
use serde::Deserialize;
use talant_auth::TokenService;
use talant_core::{
  record::{Job, Profile},
  store::Store,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use handlers::{records, session};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TALANT_*` environment variables. Every key is optional.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub data_dir:        PathBuf,
  /// HMAC secret for session tokens. A random one is generated at startup
  /// when absent, which invalidates every session on restart.
  pub token_secret:    Option<String>,
  pub token_ttl_hours: i64,
  pub cookie_name:     String,
  pub cookie_secure:   bool,
  /// Served for any path no route matches.
  pub static_dir:      Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "127.0.0.1".to_string(),
      port:            8080,
      data_dir:        PathBuf::from("."),
      token_secret:    None,
      token_ttl_hours: talant_auth::token::DEFAULT_TTL_HOURS,
      cookie_name:     "auth_token".to_string(),
      cookie_secure:   false,
      static_dir:      None,
    }
  }
}

impl ServerConfig {
  /// The session lifetime; rejects a non-positive or out-of-range
  /// `token_ttl_hours`.
  pub fn token_ttl(&self) -> anyhow::Result<TimeDelta> {
    let hours = self.token_ttl_hours;
    if hours <= 0 {
      anyhow::bail!("token_ttl_hours must be positive, got {hours}");
    }
    TimeDelta::try_hours(hours)
      .filter(|ttl| chrono::Utc::now().checked_add_signed(*ttl).is_some())
      .ok_or_else(|| anyhow::anyhow!("token_ttl_hours is out of range: {hours}"))
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub tokens: Arc<TokenService>,
  pub config: Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      tokens: Arc::clone(&self.tokens),
      config: Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the service.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: Store + 'static,
{
  let static_dir = state.config.static_dir.clone();

  let app = Router::new()
    .route("/register",     post(session::register::<S>))
    .route("/singin",       post(session::register::<S>))
    .route("/login",        post(session::login::<S>))
    .route("/checkauth",    get(session::check))
    .route("/logout",       post(session::logout::<S>))
    .route("/showjobs",     get(records::list::<S, Job>))
    .route("/createjob",    post(records::create::<S, Job>))
    .route("/myjobs",       get(records::mine::<S, Job>))
    .route(
      "/job/{id}",
      get(records::open::<S, Job>)
        .put(records::update::<S, Job>)
        .delete(records::delete::<S, Job>),
    )
    .route("/showankety",   get(records::list::<S, Profile>))
    .route("/createankety", post(records::create::<S, Profile>))
    .route("/myankety",     get(records::mine::<S, Profile>))
    .route(
      "/ankety/{id}",
      get(records::open::<S, Profile>)
        .put(records::update::<S, Profile>)
        .delete(records::delete::<S, Profile>),
    )
    .with_state(state);

  let app = match static_dir {
    Some(dir) => app.fallback_service(ServeDir::new(dir)),
    None => app,
  };

  app.layer(cors::layer()).layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
