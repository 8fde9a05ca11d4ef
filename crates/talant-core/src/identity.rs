//! Registered accounts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A registered account as persisted by a credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
  pub id:            Uuid,
  /// Display name; unique across the store.
  pub username:      String,
  /// Contact address; unique across the store.
  pub usermail:      String,
  /// Argon2 PHC string, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Registration input. The password is plaintext and never persisted.
#[derive(Debug, Clone)]
pub struct NewIdentity {
  pub username: String,
  pub usermail: String,
  pub password: String,
}

impl NewIdentity {
  pub fn new(
    username: impl Into<String>,
    usermail: impl Into<String>,
    password: impl Into<String>,
  ) -> Self {
    Self {
      username: username.into(),
      usermail: usermail.into(),
      password: password.into(),
    }
  }

  /// All three fields are required; whitespace alone counts as blank.
  pub fn validate(&self) -> Result<()> {
    let blank = |s: &str| s.trim().is_empty();
    if blank(&self.username) || blank(&self.usermail) || blank(&self.password) {
      return Err(Error::Validation("missing fields".to_string()));
    }
    Ok(())
  }

  /// Whether `other` collides with this registration on name or address.
  pub fn collides_with(&self, other: &Identity) -> bool {
    other.username == self.username || other.usermail == self.usermail
  }
}

impl Identity {
  /// Matches a login given either the display name or the contact address.
  pub fn matches_login(&self, login: &str) -> bool {
    self.username == login || self.usermail == login
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn alice() -> Identity {
    Identity {
      id:            Uuid::new_v4(),
      username:      "alice".into(),
      usermail:      "a@x.com".into(),
      password_hash: String::new(),
    }
  }

  #[test]
  fn blank_fields_are_rejected() {
    assert!(NewIdentity::new("alice", "a@x.com", "pw").validate().is_ok());
    assert!(matches!(
      NewIdentity::new("", "a@x.com", "pw").validate(),
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      NewIdentity::new("alice", "a@x.com", "").validate(),
      Err(Error::Validation(_))
    ));
  }

  #[test]
  fn whitespace_only_fields_are_blank() {
    for (name, mail, pw) in [("  ", "a@x.com", "pw"), ("alice", "\t\n", "pw"), ("alice", "a@x.com", " ")] {
      assert!(
        matches!(NewIdentity::new(name, mail, pw).validate(), Err(Error::Validation(_))),
        "{name:?} {mail:?} {pw:?}"
      );
    }
  }

  #[test]
  fn collision_is_case_sensitive_on_either_field() {
    let existing = alice();
    assert!(NewIdentity::new("alice", "other@x.com", "pw").collides_with(&existing));
    assert!(NewIdentity::new("bob", "a@x.com", "pw").collides_with(&existing));
    assert!(!NewIdentity::new("Alice", "A@x.com", "pw").collides_with(&existing));
  }

  #[test]
  fn login_matches_name_or_address() {
    let a = alice();
    assert!(a.matches_login("alice"));
    assert!(a.matches_login("a@x.com"));
    assert!(!a.matches_login("bob"));
  }

  #[test]
  fn persisted_shape() {
    let json = serde_json::to_value(alice()).unwrap();
    let obj = json.as_object().unwrap();
    for key in ["id", "username", "usermail", "password_hash"] {
      assert!(obj.contains_key(key), "missing {key}");
    }
    assert_eq!(obj.len(), 4);
  }
}
