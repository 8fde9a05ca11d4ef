//! The store traits implemented by storage backends.
//!
//! Backends (e.g. `talant-store-json`) implement [`CredentialStore`] and one
//! [`RecordStore`] per record kind. The server depends on the [`Store`]
//! bundle, not on any concrete backend.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  identity::{Identity, NewIdentity},
  record::{Job, Profile, Record, RecordKind},
};

// ─── Credentials ─────────────────────────────────────────────────────────────

pub trait CredentialStore: Send + Sync {
  /// Register a new identity.
  ///
  /// Fails with [`Error::DuplicateIdentity`](crate::Error::DuplicateIdentity)
  /// if the username or the address is already registered.
  fn register(
    &self,
    input: NewIdentity,
  ) -> impl Future<Output = Result<Identity>> + Send + '_;

  /// Verify a password for the identity whose username or address is `login`.
  ///
  /// An unknown login and a wrong password both fail with
  /// [`Error::InvalidCredentials`](crate::Error::InvalidCredentials).
  fn authenticate<'a>(
    &'a self,
    login: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<Identity>> + Send + 'a;
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// Ownership-scoped CRUD over the collection of records of kind `K`.
///
/// Mutations of one collection are serialised; a failed mutation leaves the
/// collection exactly as it was.
pub trait RecordStore<K: RecordKind>: Send + Sync {
  /// Every record, in creation order.
  fn list(&self) -> impl Future<Output = Result<Vec<Record<K>>>> + Send + '_;

  /// A single record by id.
  fn open(&self, id: Uuid) -> impl Future<Output = Result<Record<K>>> + Send + '_;

  /// The records owned by `owner`; empty if there are none.
  fn owned_by(
    &self,
    owner: Uuid,
  ) -> impl Future<Output = Result<Vec<Record<K>>>> + Send + '_;

  /// Validate `fields`, enforce the one-per-owner rule and append a new record.
  fn create(
    &self,
    owner: Uuid,
    fields: K,
  ) -> impl Future<Output = Result<Record<K>>> + Send + '_;

  /// Replace every field of record `id`. Only its owner may do this.
  fn update(
    &self,
    id: Uuid,
    owner: Uuid,
    fields: K,
  ) -> impl Future<Output = Result<Record<K>>> + Send + '_;

  /// Remove record `id`. Only its owner may do this.
  fn delete(
    &self,
    id: Uuid,
    owner: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;
}

/// Everything the server needs from a backend.
pub trait Store:
  CredentialStore + RecordStore<Job> + RecordStore<Profile> + Send + Sync
{
}

impl<T> Store for T where
  T: CredentialStore + RecordStore<Job> + RecordStore<Profile> + Send + Sync
{
}
