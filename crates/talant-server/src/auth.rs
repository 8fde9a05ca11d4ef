//! Session-cookie extractor and standalone authorizer.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::TimeDelta;
use talant_auth::{SessionIdentity, TokenService};

use crate::{AppState, ServerConfig, error::Error};

/// The caller's identity, taken from a valid session cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionIdentity);

/// Resolve the session cookie `name` in `jar` to an identity.
///
/// A missing cookie and every kind of token failure collapse into the same
/// [`Error::Unauthorized`].
pub fn authorize(
  jar: &CookieJar,
  name: &str,
  tokens: &TokenService,
) -> Result<SessionIdentity, Error> {
  let cookie = jar.get(name).ok_or_else(Error::no_session)?;
  tokens.validate(cookie.value()).map_err(|e| {
    tracing::debug!(error = %e, "rejected session token");
    Error::no_session()
  })
}

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let jar = CookieJar::from_headers(&parts.headers);
    authorize(&jar, &state.config.cookie_name, &state.tokens).map(CurrentUser)
  }
}

// ─── Cookies ─────────────────────────────────────────────────────────────────

/// The cookie carrying a freshly issued token.
pub fn session_cookie(config: &ServerConfig, token: String, ttl: TimeDelta) -> Cookie<'static> {
  Cookie::build((config.cookie_name.clone(), token))
    .path("/")
    .http_only(true)
    .secure(config.cookie_secure)
    .max_age(time::Duration::seconds(ttl.num_seconds()))
    .build()
}

/// An empty, already-expired replacement for the session cookie.
///
/// This only asks the client to forget its token; the token itself stays
/// valid until it expires.
pub fn expired_cookie(config: &ServerConfig) -> Cookie<'static> {
  let mut cookie = Cookie::build((config.cookie_name.clone(), ""))
    .path("/")
    .http_only(true)
    .secure(config.cookie_secure)
    .build();
  cookie.make_removal();
  cookie
}
