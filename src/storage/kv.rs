//! Keyed blob persistence
//!
//! The record store only needs three primitives: read a blob by key, replace
//! it, and delete it. [`JsonFileStore`] keeps one file per key on disk;
//! [`MemoryStore`] keeps blobs in a map for tests and throwaway sessions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::KharchaResult;

use super::file_io::{read_optional, remove_if_exists, write_atomic};

/// Generic keyed persistence interface
pub trait KeyValueStore {
    /// Read the blob stored under `key`, if any
    fn read(&self, key: &str) -> KharchaResult<Option<String>>;

    /// Replace the blob stored under `key`
    fn write(&mut self, key: &str, blob: &str) -> KharchaResult<()>;

    /// Remove the blob stored under `key`; removing a missing key is a no-op
    fn delete(&mut self, key: &str) -> KharchaResult<()>;
}

/// File-backed store: each key maps to `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    ///
    /// Characters outside `[a-z0-9@._+-]` are written as `%XX` per UTF-8
    /// byte, so distinct keys always get distinct files and no key can
    /// escape the data directory. Uppercase letters are encoded as well,
    /// which keeps `A@x.com` and `a@x.com` apart on case-insensitive
    /// filesystems.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_file_stem(key)))
    }
}

fn encode_file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for c in key.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '@' | '.' | '_' | '+' | '-') {
            stem.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                stem.push('%');
                stem.push_str(&hex::encode_upper([byte]));
            }
        }
    }
    stem
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> KharchaResult<Option<String>> {
        read_optional(self.path_for(key))
    }

    fn write(&mut self, key: &str, blob: &str) -> KharchaResult<()> {
        write_atomic(self.path_for(key), blob)
    }

    fn delete(&mut self, key: &str) -> KharchaResult<()> {
        remove_if_exists(self.path_for(key))
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> KharchaResult<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &str) -> KharchaResult<()> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> KharchaResult<()> {
        self.blobs.remove(key);
        Ok(())
    }
}
