use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{Mutex, MutexGuard};

use crate::config::WriteMode;
use crate::errors::StoreError;
use crate::persistence::{read_collection, write_collection};

/// A named collection persisted as one JSON array in one file.
///
/// Nothing is cached: every `load` re-reads the file and every `replace`
/// rewrites all of it. Handlers go through `modify` for read-modify-write
/// so that, in [`WriteMode::Serialized`], the whole sequence runs under the
/// collection's lock.
#[derive(Debug)]
pub struct JsonCollection<T> {
    name: &'static str,
    path: PathBuf,
    atomic_writes: bool,
    lock: Option<Mutex<()>>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(
        name: &'static str,
        path: impl Into<PathBuf>,
        mode: WriteMode,
        atomic_writes: bool,
    ) -> Self {
        let lock = match mode {
            WriteMode::Serialized => Some(Mutex::new(())),
            WriteMode::Unguarded => None,
        };

        Self {
            name,
            path: path.into(),
            atomic_writes,
            lock,
            _records: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole collection.
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        let _guard = self.guard().await;
        read_collection(self.name, &self.path).await
    }

    /// Overwrite the whole collection with `items`.
    pub async fn replace(&self, items: &[T]) -> Result<(), StoreError> {
        let _guard = self.guard().await;
        write_collection(self.name, &self.path, items, self.atomic_writes).await
    }

    /// Load, run `f` on the records, write them back, and hand back
    /// whatever `f` returned. Nothing is written if the load fails.
    pub async fn modify<R, F>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.guard().await;

        let mut items = read_collection(self.name, &self.path).await?;
        let out = f(&mut items);
        write_collection(self.name, &self.path, &items, self.atomic_writes).await?;

        Ok(out)
    }

    async fn guard(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }
}
