//! Tuple Store
//!
//! Directory-backed key/value store: the store directory is the table, one
//! keyfile per key.
//!
//! ## Concurrency
//!
//! None of these operations is internally thread-safe with respect to the
//! others. The dispatcher wraps the whole store in a single global mutex and
//! holds it across each complete operation; there is no per-key locking.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::tuple::Tuple;

use super::keyfile::{self, OpenMode};

/// The directory-backed store
pub struct TupleStore {
    /// Store directory; each entry is one keyfile
    store_dir: PathBuf,
}

impl TupleStore {
    /// Create a handle on the given store directory.
    ///
    /// No I/O happens here; the directory is created lazily by the
    /// operations that enumerate it (`reset_all`, `count`).
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
        }
    }

    /// Get the store directory path
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Remove every keyfile, creating the store directory if absent.
    ///
    /// A removal failure aborts mid-way and leaves a partially emptied
    /// store; there is no rollback.
    pub fn reset_all(&self) -> Result<()> {
        fs::create_dir_all(&self.store_dir)?;

        for entry in fs::read_dir(&self.store_dir)? {
            let entry = entry?;
            fs::remove_file(entry.path())?;
        }

        Ok(())
    }

    /// Whether a tuple is stored under `key`.
    ///
    /// Existence is solely the openability of the keyfile for reading;
    /// content validity is not checked.
    pub fn exists(&self, key: i32) -> bool {
        keyfile::open(&self.store_dir, key, OpenMode::Read).is_ok()
    }

    /// Read the tuple stored under `key`.
    ///
    /// Fails with `KeyNotFound` if absent and `Corrupt` if the keyfile does
    /// not hold three parsable lines. Read-only: a parse failure leaves the
    /// keyfile untouched.
    pub fn read(&self, key: i32) -> Result<Tuple> {
        let mut file = keyfile::open(&self.store_dir, key, OpenMode::Read)?;
        keyfile::read_tuple(&mut file, key)
    }

    /// Insert a new tuple. Fails with `KeyExists` if the key is taken;
    /// a partial write is not cleaned up.
    pub fn create(&self, tuple: &Tuple) -> Result<()> {
        let mut file = keyfile::open(&self.store_dir, tuple.key, OpenMode::Create)?;
        keyfile::write_tuple(&mut file, tuple)
    }

    /// Replace the tuple stored under an existing key. Fails with
    /// `KeyNotFound` if absent; same partial-write caveat as `create`.
    pub fn overwrite(&self, tuple: &Tuple) -> Result<()> {
        let mut file = keyfile::open(&self.store_dir, tuple.key, OpenMode::Modify)?;
        keyfile::write_tuple(&mut file, tuple)
    }

    /// Remove the tuple stored under `key`. Fails with `KeyNotFound` if
    /// absent.
    pub fn delete(&self, key: i32) -> Result<()> {
        if !self.exists(key) {
            return Err(StoreError::KeyNotFound);
        }
        fs::remove_file(keyfile::keyfile_path(&self.store_dir, key))?;
        Ok(())
    }

    /// Count the stored tuples, creating the store directory if absent
    pub fn count(&self) -> Result<u32> {
        fs::create_dir_all(&self.store_dir)?;

        let mut num_items = 0;
        for entry in fs::read_dir(&self.store_dir)? {
            entry?;
            num_items += 1;
        }

        Ok(num_items)
    }
}
