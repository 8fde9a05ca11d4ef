//! Owned records and the record kinds stored by the service.
//!
//! A [`Record`] pairs a kind-specific field set with the id of the record and
//! the id of the identity that owns it. The field set is flattened when
//! serialised, so a persisted job looks like
//! `{"id": …, "user_id": …, "title": …, …}`.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// A family of records sharing one collection and one set of field rules.
pub trait RecordKind:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  /// Human-readable kind name used in errors and logs.
  const NAME: &'static str;

  /// Whether an owner may hold at most one record of this kind.
  const ONE_PER_OWNER: bool = true;

  /// Check the required fields of a create or update payload.
  fn validate(&self) -> Result<()>;
}

/// Fail with [`Error::Validation`] if any named field is blank.
fn require(fields: &[(&str, &str)]) -> Result<()> {
  let missing: Vec<&str> = fields
    .iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| *name)
    .collect();
  if missing.is_empty() {
    Ok(())
  } else {
    Err(Error::Validation(format!("required: {}", missing.join(", "))))
  }
}

/// A job posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
  pub title:       String,
  pub company:     String,
  pub school:      String,
  pub description: String,
  pub salary:      String,
  pub skills:      String,
}

impl RecordKind for Job {
  const NAME: &'static str = "job";

  fn validate(&self) -> Result<()> {
    require(&[("title", &self.title), ("description", &self.description)])
  }
}

/// A survey profile ("anketa").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
  pub name:   String,
  pub gender: String,
  pub age:    String,
  pub job:    String,
  pub school: String,
}

impl RecordKind for Profile {
  const NAME: &'static str = "profile";

  fn validate(&self) -> Result<()> {
    require(&[
      ("name", &self.name),
      ("gender", &self.gender),
      ("age", &self.age),
      ("job", &self.job),
      ("school", &self.school),
    ])
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A persisted record of kind `K`, owned by exactly one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<K> {
  pub id:      Uuid,
  /// The owning identity. Set at creation and never changed.
  pub user_id: Uuid,
  #[serde(flatten)]
  pub fields:  K,
}

impl<K: RecordKind> Record<K> {
  /// Build a record with a freshly generated id.
  pub fn new(owner: Uuid, fields: K) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id: owner,
      fields,
    }
  }

  pub fn is_owned_by(&self, owner: Uuid) -> bool { self.user_id == owner }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn job(title: &str, description: &str) -> Job {
    Job {
      title: title.into(),
      description: description.into(),
      ..Job::default()
    }
  }

  #[test]
  fn job_requires_title_and_description() {
    assert!(job("Eng", "Build things").validate().is_ok());
    let err = job("  ", "").validate().unwrap_err();
    match err {
      Error::Validation(msg) => {
        assert!(msg.contains("title"), "{msg}");
        assert!(msg.contains("description"), "{msg}");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn profile_requires_every_field() {
    let mut p = Profile {
      name:   "Alice".into(),
      gender: "f".into(),
      age:    "30".into(),
      job:    "Engineer".into(),
      school: "MIT".into(),
    };
    assert!(p.validate().is_ok());
    p.age.clear();
    assert!(matches!(p.validate(), Err(Error::Validation(msg)) if msg == "required: age"));
  }

  #[test]
  fn record_fields_are_flattened() {
    let owner = Uuid::new_v4();
    let record = Record::new(owner, job("Eng", "Build things"));
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["user_id"], owner.to_string());
    assert_eq!(json["title"], "Eng");
    assert!(json.get("fields").is_none());

    let back: Record<Job> = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
  }

  #[test]
  fn missing_fields_default_to_empty() {
    let json = serde_json::json!({
      "id": Uuid::new_v4(),
      "user_id": Uuid::new_v4(),
      "title": "Eng",
    });
    let record: Record<Job> = serde_json::from_value(json).unwrap();
    assert_eq!(record.fields.title, "Eng");
    assert_eq!(record.fields.salary, "");
  }
}
