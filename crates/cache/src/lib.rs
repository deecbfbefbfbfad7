//! JSON-file cache of previously resolved device codes.
//!
//! The cache is a flat JSON array of `{code, device, comment}` records,
//! loaded once at the start of a run, queried and appended to in memory,
//! and rewritten wholesale at the end. It is not a source of truth for
//! anything - deleting the file only costs repeated network lookups.
//!
//! Entries are first-write-wins: [`Cache::upsert`] refuses to replace an
//! existing record for the same code, so a device name resolved once stays
//! stable across runs.

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// One persisted resolution: the code as it was queried, the device name
/// that was found for it, and the diagnostic comment from that run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub code: String,
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub comment: String,
}

/// In-memory view of the cache file.
#[derive(Debug)]
pub struct Cache {
    path: PathBuf,
    entries: Vec<CacheEntry>,
    added: usize,
}

impl Cache {
    /// Load the cache from `path`.
    ///
    /// A missing or unreadable file is an error so the caller can warn the
    /// operator; proceeding without a cache is the caller's call, via
    /// [`Cache::empty`].
    #[instrument]
    pub fn load(path: impl AsRef<Path> + std::fmt::Debug) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).or_raise(|| ErrorKind::Unreadable(path.to_path_buf()))?;
        let entries: Vec<CacheEntry> =
            serde_json::from_str(&contents).or_raise(|| ErrorKind::Corrupt(path.to_path_buf()))?;
        tracing::debug!(entries = entries.len(), "cache loaded");
        Ok(Self { path: path.to_path_buf(), entries, added: 0 })
    }

    /// An empty cache that will persist to `path` on flush.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), entries: Vec::new(), added: 0 }
    }

    /// Find the entry for a code, if one was ever stored.
    pub fn lookup(&self, code: &str) -> Option<&CacheEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    /// Add an entry unless one already exists for the same code.
    ///
    /// Returns `true` if the entry was added. Never overwrites: the first
    /// resolution recorded for a code wins.
    pub fn upsert(&mut self, entry: CacheEntry) -> bool {
        if self.lookup(&entry.code).is_some() {
            return false;
        }
        self.entries.push(entry);
        self.added += 1;
        true
    }

    /// Rewrite the whole cache file from the in-memory set, creating parent
    /// directories as needed.
    #[instrument(skip(self), fields(path = %self.path.display(), entries = self.entries.len()))]
    pub fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).or_raise(|| ErrorKind::Unwritable(self.path.clone()))?;
        }
        let json = serde_json::to_string(&self.entries)
            .or_raise(|| ErrorKind::Unwritable(self.path.clone()))?;
        std::fs::write(&self.path, json).or_raise(|| ErrorKind::Unwritable(self.path.clone()))?;
        Ok(())
    }

    /// Number of entries added since this cache was loaded.
    pub fn added(&self) -> usize {
        self.added
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
