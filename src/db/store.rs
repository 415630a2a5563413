//! Whole-collection persistence.
//!
//! A [`Store`] only knows how to load and replace an entire collection.
//! [`Collection`] wraps a store with a mutex held across the full
//! load → mutate → save cycle, so a single process has exactly one writer
//! per collection at any time.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use rusqlite::params;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Repository contract: `load()` the full collection, `save_all()` replaces it.
///
/// Malformed persisted data is never an error: implementations log it and
/// return an empty collection.
pub trait Store<T> {
    fn load(&self) -> AppResult<Vec<T>>;
    fn save_all(&self, items: &[T]) -> AppResult<()>;
}

// ---------------------------
// JSON file backend
// ---------------------------

/// One JSON array per file, rewritten in full on every save.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> Store<T> for JsonFileStore<T> {
    fn load(&self) -> AppResult<Vec<T>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<T>>(&content) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(
                    file = %self.path.display(),
                    error = %e,
                    "corrupted store file, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, items: &[T]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(items)?;

        // write + rename: readers see either the old or the new file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json.as_bytes())?;
        fs::rename(&tmp, &self.path)?;

        tracing::trace!(file = %self.path.display(), count = items.len(), "store saved");
        Ok(())
    }
}

// ---------------------------
// SQLite backend
// ---------------------------

/// Stores a collection as JSON documents in the shared `collections` table.
pub struct SqliteStore<T> {
    db_path: PathBuf,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SqliteStore<T> {
    pub fn new(db_path: &Path, name: &'static str) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
            name,
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Store<T> for SqliteStore<T> {
    fn load(&self) -> AppResult<Vec<T>> {
        let pool = DbPool::new(&self.db_path)?;

        let mut stmt = pool.conn.prepare_cached(
            "SELECT body FROM collections WHERE name = ?1 ORDER BY position ASC",
        )?;
        let rows = stmt.query_map(params![self.name], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            let body = r?;
            match serde_json::from_str::<T>(&body) {
                Ok(item) => out.push(item),
                Err(e) => {
                    tracing::warn!(
                        collection = self.name,
                        error = %e,
                        "corrupted row, treating collection as empty"
                    );
                    return Ok(Vec::new());
                }
            }
        }

        Ok(out)
    }

    fn save_all(&self, items: &[T]) -> AppResult<()> {
        let mut pool = DbPool::new(&self.db_path)?;
        let name = self.name;

        pool.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM collections WHERE name = ?1", params![name])?;
            {
                let mut ins = tx.prepare_cached(
                    "INSERT INTO collections (name, position, body) VALUES (?1, ?2, ?3)",
                )?;
                for (pos, item) in items.iter().enumerate() {
                    let body = serde_json::to_string(item)?;
                    ins.execute(params![name, pos as i64, body])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
    }
}

// ---------------------------
// In-memory backend
// ---------------------------

pub struct MemoryStore<T> {
    items: Mutex<Vec<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Clone> Store<T> for MemoryStore<T> {
    fn load(&self) -> AppResult<Vec<T>> {
        let items = self
            .items
            .lock()
            .map_err(|_| AppError::Other("memory store lock poisoned".into()))?;
        Ok(items.clone())
    }

    fn save_all(&self, items: &[T]) -> AppResult<()> {
        let mut guard = self
            .items
            .lock()
            .map_err(|_| AppError::Other("memory store lock poisoned".into()))?;
        *guard = items.to_vec();
        Ok(())
    }
}

// ---------------------------
// Single-writer wrapper
// ---------------------------

pub struct Collection<T> {
    store: Box<dyn Store<T>>,
    lock: Mutex<()>,
}

impl<T: 'static> Collection<T> {
    pub fn new<S: Store<T> + 'static>(store: S) -> Self {
        Self {
            store: Box::new(store),
            lock: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self
    where
        T: Clone,
    {
        Self::new(MemoryStore::default())
    }

    pub fn load(&self) -> AppResult<Vec<T>> {
        let _guard = self.acquire()?;
        self.store.load()
    }

    /// Load, apply `f`, save the whole collection.
    /// Nothing is saved when `f` fails.
    pub fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> AppResult<R>) -> AppResult<R> {
        self.update_when(|items| f(items).map(|r| (r, true)))
    }

    /// Like [`update`](Self::update); `f` reports whether it changed anything
    /// and the save is skipped otherwise.
    pub fn update_when<R>(
        &self,
        f: impl FnOnce(&mut Vec<T>) -> AppResult<(R, bool)>,
    ) -> AppResult<R> {
        let _guard = self.acquire()?;
        let mut items = self.store.load()?;
        let (out, changed) = f(&mut items)?;
        if changed {
            self.store.save_all(&items)?;
        }
        Ok(out)
    }

    fn acquire(&self) -> AppResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| AppError::Other("collection lock poisoned".into()))
    }
}
