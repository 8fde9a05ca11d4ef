//! [`JsonStore`]: the flat-file implementation of the Talant store traits.

use std::path::Path;

use uuid::Uuid;

use talant_auth::password::{hash_password, verify_against_dummy, verify_password};
use talant_core::{
  Error as CoreError,
  identity::{Identity, NewIdentity},
  record::{Job, Profile, Record, RecordKind},
  store::{CredentialStore, RecordStore},
};

use crate::{Collection, Error, Result};

pub const USERS_FILE: &str = "users.json";
pub const JOBS_FILE: &str = "job.json";
pub const PROFILES_FILE: &str = "ankety.json";

// ─── Store ───────────────────────────────────────────────────────────────────

/// Users, jobs and profiles, each in its own file under one data directory.
///
/// The three collections are locked independently.
#[derive(Debug)]
pub struct JsonStore {
  users:    Collection<Identity>,
  jobs:     Collection<Record<Job>>,
  profiles: Collection<Record<Profile>>,
}

impl JsonStore {
  /// Open (or create) a store rooted at `dir`.
  pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await.map_err(Error::io(dir))?;
    Ok(Self {
      users:    Collection::open(dir.join(USERS_FILE)).await?,
      jobs:     Collection::open(dir.join(JOBS_FILE)).await?,
      profiles: Collection::open(dir.join(PROFILES_FILE)).await?,
    })
  }
}

/// Maps a record kind to the collection holding it.
pub trait HasRecords<K: RecordKind> {
  fn records(&self) -> &Collection<Record<K>>;
}

impl HasRecords<Job> for JsonStore {
  fn records(&self) -> &Collection<Record<Job>> { &self.jobs }
}

impl HasRecords<Profile> for JsonStore {
  fn records(&self) -> &Collection<Record<Profile>> { &self.profiles }
}

// ─── CredentialStore impl ────────────────────────────────────────────────────

impl CredentialStore for JsonStore {
  async fn register(&self, input: NewIdentity) -> talant_core::Result<Identity> {
    input.validate()?;

    let password = input.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
      .await
      .map_err(Error::Join)?
      .map_err(Error::Password)?;

    let identity = self
      .users
      .mutate(move |users| {
        if users.iter().any(|u| input.collides_with(u)) {
          return Err(CoreError::DuplicateIdentity);
        }
        let identity = Identity {
          id: Uuid::new_v4(),
          username: input.username,
          usermail: input.usermail,
          password_hash,
        };
        users.push(identity.clone());
        Ok(identity)
      })
      .await?;
    Ok(identity)
  }

  async fn authenticate(
    &self,
    login: &str,
    password: &str,
  ) -> talant_core::Result<Identity> {
    let candidates: Vec<Identity> = self
      .users
      .read(|users| {
        users
          .iter()
          .filter(|u| u.matches_login(login))
          .cloned()
          .collect()
      })
      .await;

    let password = password.to_owned();
    let found = tokio::task::spawn_blocking(move || {
      if candidates.is_empty() {
        verify_against_dummy(&password);
        return None;
      }
      candidates
        .into_iter()
        .find(|c| verify_password(&password, &c.password_hash))
    })
    .await
    .map_err(Error::Join)?;

    found.ok_or(CoreError::InvalidCredentials)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl<K> RecordStore<K> for JsonStore
where
  K: RecordKind,
  JsonStore: HasRecords<K>,
{
  async fn list(&self) -> talant_core::Result<Vec<Record<K>>> {
    Ok(HasRecords::<K>::records(self).read(|records| records.to_vec()).await)
  }

  async fn open(&self, id: Uuid) -> talant_core::Result<Record<K>> {
    HasRecords::<K>::records(self)
      .read(|records| records.iter().find(|r| r.id == id).cloned())
      .await
      .ok_or(CoreError::NotFound { kind: K::NAME, id })
  }

  async fn owned_by(&self, owner: Uuid) -> talant_core::Result<Vec<Record<K>>> {
    Ok(
      HasRecords::<K>::records(self)
        .read(|records| {
          records
            .iter()
            .filter(|r| r.is_owned_by(owner))
            .cloned()
            .collect()
        })
        .await,
    )
  }

  async fn create(&self, owner: Uuid, fields: K) -> talant_core::Result<Record<K>> {
    fields.validate()?;
    let record = HasRecords::<K>::records(self)
      .mutate(move |records| {
        if K::ONE_PER_OWNER && records.iter().any(|r| r.is_owned_by(owner)) {
          return Err(CoreError::AlreadyExists(K::NAME));
        }
        let record = Record::new(owner, fields);
        records.push(record.clone());
        Ok(record)
      })
      .await?;
    Ok(record)
  }

  async fn update(
    &self,
    id: Uuid,
    owner: Uuid,
    fields: K,
  ) -> talant_core::Result<Record<K>> {
    let record = HasRecords::<K>::records(self)
      .mutate(move |records| {
        let record = records
          .iter_mut()
          .find(|r| r.id == id)
          .ok_or(CoreError::NotFound { kind: K::NAME, id })?;
        if !record.is_owned_by(owner) {
          return Err(CoreError::NotOwner { kind: K::NAME, id });
        }
        fields.validate()?;
        record.fields = fields;
        Ok(record.clone())
      })
      .await?;
    Ok(record)
  }

  async fn delete(&self, id: Uuid, owner: Uuid) -> talant_core::Result<()> {
    HasRecords::<K>::records(self)
      .mutate(move |records| {
        let pos = records
          .iter()
          .position(|r| r.id == id)
          .ok_or(CoreError::NotFound { kind: K::NAME, id })?;
        if !records[pos].is_owned_by(owner) {
          return Err(CoreError::NotOwner { kind: K::NAME, id });
        }
        records.remove(pos);
        Ok(())
      })
      .await?;
    Ok(())
  }
}
