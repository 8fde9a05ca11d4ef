//! [`TokenService`]: stateless, HS256-signed session tokens.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TokenError;

/// Default session lifetime, in hours.
pub const DEFAULT_TTL_HOURS: i64 = 24;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// The claim set carried by every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  /// Identity id, as a string.
  pub sub:      String,
  pub user_id:  Uuid,
  pub username: String,
  /// Issued-at, seconds since the epoch.
  pub iat:      i64,
  /// Expires-at, seconds since the epoch.
  pub exp:      i64,
}

/// The identity asserted by a valid token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionIdentity {
  pub user_id:  Uuid,
  pub username: String,
}

/// Issues and validates session tokens with one process-wide secret.
#[derive(Clone)]
pub struct TokenService {
  encoding:   EncodingKey,
  decoding:   DecodingKey,
  validation: Validation,
  ttl:        TimeDelta,
}

impl fmt::Debug for TokenService {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TokenService")
      .field("ttl", &self.ttl)
      .finish_non_exhaustive()
  }
}

impl TokenService {
  pub fn new(secret: &[u8]) -> Self {
    Self::with_ttl(secret, TimeDelta::hours(DEFAULT_TTL_HOURS))
  }

  pub fn with_ttl(secret: &[u8], ttl: TimeDelta) -> Self {
    // Only HS256 is accepted. Expiry is checked by hand against an explicit
    // clock, with no leeway.
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp", "sub"]);

    Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      validation,
      ttl,
    }
  }

  pub fn ttl(&self) -> TimeDelta { self.ttl }

  /// Mint a token for `user_id` valid for the configured lifetime.
  pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String, TokenError> {
    self.issue_at(user_id, username, Utc::now())
  }

  pub fn issue_at(
    &self,
    user_id: Uuid,
    username: &str,
    now: DateTime<Utc>,
  ) -> Result<String, TokenError> {
    let claims = Claims {
      sub:      user_id.to_string(),
      user_id,
      username: username.to_string(),
      iat:      now.timestamp(),
      exp:      (now + self.ttl).timestamp(),
    };
    encode(&Header::new(ALGORITHM), &claims, &self.encoding)
      .map_err(TokenError::Encode)
  }

  /// Verify `token` and return the identity it asserts.
  pub fn validate(&self, token: &str) -> Result<SessionIdentity, TokenError> {
    self.validate_at(token, Utc::now())
  }

  pub fn validate_at(
    &self,
    token: &str,
    now: DateTime<Utc>,
  ) -> Result<SessionIdentity, TokenError> {
    let claims = decode::<Claims>(token, &self.decoding, &self.validation)?.claims;

    if claims.sub != claims.user_id.to_string() {
      return Err(TokenError::Invalid);
    }
    if claims.exp <= now.timestamp() {
      return Err(TokenError::Expired);
    }

    Ok(SessionIdentity {
      user_id:  claims.user_id,
      username: claims.username,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use base64::Engine as _;
  use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
  use chrono::TimeZone as _;

  const SECRET: &[u8] = b"test-secret-at-least-32-bytes-long!!";

  fn service() -> TokenService { TokenService::new(SECRET) }

  fn t0() -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() }

  fn day() -> TimeDelta { TimeDelta::hours(DEFAULT_TTL_HOURS) }

  #[test]
  fn issue_then_validate_round_trips() {
    let svc = service();
    let id = Uuid::new_v4();
    let token = svc.issue(id, "alice").unwrap();
    let who = svc.validate(&token).unwrap();
    assert_eq!(who, SessionIdentity { user_id: id, username: "alice".into() });
  }

  #[test]
  fn expiry_boundary() {
    let svc = service();
    let id = Uuid::new_v4();
    let token = svc.issue_at(id, "alice", t0()).unwrap();
    let expiry = t0() + day();

    assert!(svc.validate_at(&token, expiry - TimeDelta::seconds(1)).is_ok());
    assert!(matches!(svc.validate_at(&token, expiry), Err(TokenError::Expired)));
    assert!(matches!(
      svc.validate_at(&token, expiry + TimeDelta::seconds(1)),
      Err(TokenError::Expired)
    ));
  }

  #[test]
  fn custom_ttl_is_honoured() {
    let svc = TokenService::with_ttl(SECRET, TimeDelta::minutes(5));
    let token = svc.issue_at(Uuid::new_v4(), "alice", t0()).unwrap();
    assert!(svc.validate_at(&token, t0() + TimeDelta::minutes(4)).is_ok());
    assert!(matches!(
      svc.validate_at(&token, t0() + TimeDelta::minutes(6)),
      Err(TokenError::Expired)
    ));
  }

  #[test]
  fn claims_carry_subject_and_times() {
    let id = Uuid::new_v4();
    let token = service().issue_at(id, "alice", t0()).unwrap();
    let payload = token.split('.').nth(1).unwrap();
    let claims: Claims = serde_json::from_slice(&B64.decode(payload).unwrap()).unwrap();
    assert_eq!(claims.sub, id.to_string());
    assert_eq!(claims.iat, t0().timestamp());
    assert_eq!(claims.exp, (t0() + day()).timestamp());
  }

  #[test]
  fn other_secret_is_rejected() {
    let token = TokenService::new(b"another-secret-entirely-different")
      .issue(Uuid::new_v4(), "mallory")
      .unwrap();
    assert!(matches!(service().validate(&token), Err(TokenError::BadSignature)));
  }

  #[test]
  fn other_algorithm_is_rejected() {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let claims = Claims {
      sub:      id.to_string(),
      user_id:  id,
      username: "mallory".into(),
      iat:      now.timestamp(),
      exp:      (now + day()).timestamp(),
    };
    let token = encode(
      &Header::new(Algorithm::HS384),
      &claims,
      &EncodingKey::from_secret(SECRET),
    )
    .unwrap();
    assert!(matches!(service().validate(&token), Err(TokenError::BadSignature)));
  }

  #[test]
  fn unsigned_token_is_rejected() {
    let id = Uuid::new_v4();
    let header = B64.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let body = B64.encode(
      serde_json::json!({
        "sub": id.to_string(),
        "user_id": id,
        "username": "mallory",
        "iat": 0,
        "exp": i64::MAX / 2,
      })
      .to_string(),
    );
    let token = format!("{header}.{body}.");
    assert!(service().validate(&token).is_err());
  }

  #[test]
  fn tampered_payload_is_rejected() {
    let svc = service();
    let token = svc.issue(Uuid::new_v4(), "alice").unwrap();
    let other = svc.issue(Uuid::new_v4(), "mallory").unwrap();
    let parts: Vec<&str> = token.split('.').collect();
    let forged_body = other.split('.').nth(1).unwrap();
    let forged = format!("{}.{}.{}", parts[0], forged_body, parts[2]);
    assert!(matches!(svc.validate(&forged), Err(TokenError::BadSignature)));
  }

  #[test]
  fn garbage_is_invalid() {
    assert!(matches!(service().validate("not-a-token"), Err(TokenError::Invalid)));
    assert!(matches!(service().validate(""), Err(TokenError::Invalid)));
  }
}
