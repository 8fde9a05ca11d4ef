//! Flat-file JSON backend for the Talant stores.
//!
//! Each collection (users, jobs, profiles) is one pretty-printed JSON array on
//! disk, loaded into memory once and guarded by its own async mutex. Writes go
//! through [`Collection::mutate`], which flushes the whole array before the
//! in-memory copy is replaced.

mod collection;
mod store;

pub mod error;

pub use collection::Collection;
pub use error::{Error, Result};
pub use store::{HasRecords, JOBS_FILE, JsonStore, PROFILES_FILE, USERS_FILE};
