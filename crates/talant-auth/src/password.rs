//! Argon2 password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$…`) with a random salt, using the
//! argon2 crate's default parameters. Both operations are slow
//! and should be run off the async executor.

use std::sync::OnceLock;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::PasswordError;

/// Hash `password` with a freshly generated salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|e| PasswordError::Hash(e.to_string()))?
    .to_string();
  Ok(hash)
}

/// Whether `password` matches the PHC string `hash`. A malformed hash never
/// matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(hash) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

/// Run one verification against a throwaway hash.
///
/// Used when a login matches no identity, so that an unknown user costs the
/// same as a wrong password.
pub fn verify_against_dummy(password: &str) {
  static DUMMY: OnceLock<Option<String>> = OnceLock::new();
  let dummy = DUMMY.get_or_init(|| hash_password("talant-dummy-password").ok());
  if let Some(hash) = dummy {
    let _ = verify_password(password, hash);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let hash = hash_password("pw123").unwrap();
    assert!(hash.starts_with("$argon2"), "{hash}");
    assert!(verify_password("pw123", &hash));
    assert!(!verify_password("pw124", &hash));
  }

  #[test]
  fn salts_differ() {
    let a = hash_password("same").unwrap();
    let b = hash_password("same").unwrap();
    assert_ne!(a, b);
    assert!(verify_password("same", &a));
    assert!(verify_password("same", &b));
  }

  #[test]
  fn malformed_hash_never_matches() {
    assert!(!verify_password("pw123", "not-a-phc-string"));
    assert!(!verify_password("", ""));
  }
}
