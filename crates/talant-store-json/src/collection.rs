//! [`Collection`]: one JSON array on disk, one mutex in memory.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::{io::AsyncWriteExt as _, sync::Mutex};

use crate::{Error, Result};

/// An ordered collection persisted as a single pretty-printed JSON array.
///
/// The in-memory vector is authoritative between flushes. Every read and
/// write takes the same lock, so mutations are applied one at a time and
/// readers always see the last successfully flushed state.
#[derive(Debug)]
pub struct Collection<T> {
  path:  PathBuf,
  items: Mutex<Vec<T>>,
}

impl<T> Collection<T>
where
  T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
  /// Load the collection at `path`. A missing or blank file is empty.
  pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    let items = load(&path).await?;
    Ok(Self {
      path,
      items: Mutex::new(items),
    })
  }

  /// Run `f` against the current contents.
  pub async fn read<R, F>(&self, f: F) -> R
  where
    F: FnOnce(&[T]) -> R + Send,
  {
    let items = self.items.lock().await;
    f(&items)
  }

  /// Apply `f` to a copy of the collection, flush the copy, then publish it.
  ///
  /// If `f` fails or the flush fails, neither the file nor the in-memory
  /// collection changes.
  pub async fn mutate<R, F>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut Vec<T>) -> talant_core::Result<R> + Send,
    R: Send,
  {
    let mut items = self.items.lock().await;
    let mut next = items.clone();
    let out = f(&mut next)?;
    flush(&self.path, &next).await?;
    *items = next;
    Ok(out)
  }
}

async fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
  let bytes = match tokio::fs::read(path).await {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
    Err(e) => return Err(Error::io(path)(e)),
  };
  if bytes.iter().all(u8::is_ascii_whitespace) {
    return Ok(Vec::new());
  }
  Ok(serde_json::from_slice(&bytes)?)
}

/// Write `items` next to `path`, sync it, and rename over it, so a crash
/// mid-write never leaves a truncated array behind.
async fn flush<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
  let data = serde_json::to_vec_pretty(items)?;
  let tmp = tmp_path(path);

  let mut file = tokio::fs::File::create(&tmp).await.map_err(Error::io(&tmp))?;
  file.write_all(&data).await.map_err(Error::io(&tmp))?;
  file.sync_all().await.map_err(Error::io(&tmp))?;
  drop(file);

  tokio::fs::rename(&tmp, path).await.map_err(Error::io(path))?;
  Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
  let mut name = path.file_name().unwrap_or_default().to_os_string();
  name.push(".tmp");
  path.with_file_name(name)
}
