//! Registration, login, session check and logout.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/register` | Form: `username`, `usermail`, `password`; 201 |
//! | `POST` | `/login` | Form: `username` (name or address), `password`; sets the session cookie |
//! | `GET`  | `/checkauth` | Returns the caller's username |
//! | `POST` | `/logout` | Replaces the session cookie with an expired one |

use axum::{
  extract::{Form, State},
  http::StatusCode,
  response::IntoResponse,
};
use axum_extra::extract::{WithRejection, cookie::CookieJar};
use serde::Deserialize;
use talant_core::{
  identity::NewIdentity,
  store::{CredentialStore, Store},
};

use crate::{
  AppState,
  auth::{CurrentUser, expired_cookie, session_cookie},
  error::Error,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
  pub username: String,
  pub usermail: String,
  pub password: String,
}

/// `POST /register`
pub async fn register<S: Store + 'static>(
  State(state): State<AppState<S>>,
  WithRejection(Form(form), _): WithRejection<Form<RegisterForm>, Error>,
) -> Result<impl IntoResponse, Error> {
  let identity = state
    .store
    .register(NewIdentity::new(form.username, form.usermail, form.password))
    .await?;
  tracing::info!(user_id = %identity.id, username = %identity.username, "registered");
  Ok((StatusCode::CREATED, "Sign up successful"))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
  /// Username or email address.
  pub username: String,
  pub password: String,
}

/// `POST /login`
pub async fn login<S: Store + 'static>(
  State(state): State<AppState<S>>,
  jar: CookieJar,
  WithRejection(Form(form), _): WithRejection<Form<LoginForm>, Error>,
) -> Result<impl IntoResponse, Error> {
  if form.username.is_empty() || form.password.is_empty() {
    return Err(Error::BadRequest("missing fields".to_string()));
  }

  let identity = state.store.authenticate(&form.username, &form.password).await?;
  let token = state.tokens.issue(identity.id, &identity.username)?;
  tracing::info!(user_id = %identity.id, "logged in");

  let jar = jar.add(session_cookie(&state.config, token, state.tokens.ttl()));
  Ok((jar, "Login successful"))
}

/// `GET /checkauth`
pub async fn check(CurrentUser(who): CurrentUser) -> String { who.username }

/// `POST /logout`
pub async fn logout<S: Store + 'static>(
  State(state): State<AppState<S>>,
  jar: CookieJar,
) -> impl IntoResponse {
  (jar.add(expired_cookie(&state.config)), "Logged out successfully")
}
