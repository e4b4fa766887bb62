//! On-disk content cache for incremental builds.
//!
//! Rendering a page is cheap; the point of the cache is to avoid touching
//! output files whose content has not changed, so downstream consumers
//! (rsync, CDN upload, file watchers) see only real changes. The engine
//! consults the cache before every write and updates it after.
//!
//! # Design
//!
//! One entry file per output path, stored under `<cache_root>/hashes/`:
//!
//! - the entry **filename** is the hex XXH3 digest of the resolved output
//!   path plus a `.hash` suffix. Hashing the path instead of encoding it
//!   keeps entry names fixed-length and filesystem-safe regardless of path
//!   depth or characters;
//! - the entry **contents** are the hex XXH3 digest of the last-written
//!   output. Storing a digest instead of the raw content keeps the cache
//!   small and the comparison O(1) once the new content is hashed.
//!
//! Entries are created or overwritten on every successful write and never
//! deleted: an abandoned output path leaves behind one ~33-byte file that
//! can never affect another path's skip decision.
//!
//! ## Atomic updates
//!
//! [`ContentCache::set`] writes the digest to a uniquely named temporary
//! file in the entry directory, flushes it to disk, then renames it over the
//! target. A reader can never observe a partially written entry, and two
//! concurrent writers cannot corrupt each other: the last rename wins.
//! This rename protocol is the only concurrency-safety mechanism the cache
//! provides.

use crate::fingerprint::Fingerprint;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::trace;

/// Subdirectory of the cache root that holds entry files.
const ENTRIES_SUBDIR: &str = "hashes";

/// Suffix of every entry file.
const ENTRY_SUFFIX: &str = "hash";

/// Counter for unique temporary file names within this process.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to create cache directory {path}: {source}")]
    DirCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read cache entry {path}: {source}")]
    EntryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cache entry {path} does not contain a valid fingerprint")]
    EntryCorrupt { path: PathBuf },
    #[error("Failed to write cache entry {path}: {source}")]
    EntryWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Persistent map from output path to the fingerprint of its last-written
/// content.
///
/// Constructed per build from an explicit cache root, with no process-wide
/// state, so independent builds (and independent tests) never interfere.
#[derive(Debug, Clone)]
pub struct ContentCache {
    entries_dir: PathBuf,
}

impl ContentCache {
    /// Cache rooted at `cache_root`; entries live in `<cache_root>/hashes/`.
    ///
    /// Nothing is created on disk until the first [`set`](Self::set).
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            entries_dir: cache_root.into().join(ENTRIES_SUBDIR),
        }
    }

    /// Entry file for an output path: `<hex(xxh3(path))>.hash`.
    pub fn entry_path(&self, path: &Path) -> PathBuf {
        let key = Fingerprint::from_bytes(path.to_string_lossy().as_bytes());
        self.entries_dir.join(format!("{key}.{ENTRY_SUFFIX}"))
    }

    /// Fingerprint of the content last written to `path`, if any.
    ///
    /// A missing entry is `Ok(None)`. An entry that exists but cannot be
    /// read, or whose contents are not a fingerprint, is a fatal error,
    /// never silently treated as absent.
    pub fn get(&self, path: &Path) -> Result<Option<Fingerprint>, CacheError> {
        let entry = self.entry_path(path);
        let text = match fs::read_to_string(&entry) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(CacheError::EntryRead {
                path: entry,
                source,
            }),
        };
        match Fingerprint::from_hex(text.trim()) {
            Some(fingerprint) => Ok(Some(fingerprint)),
            None => Err(CacheError::EntryCorrupt { path: entry }),
        }
    }

    /// Record `content` as the current state of `path`.
    ///
    /// Creates the entry directory on demand, then performs the atomic
    /// temp-write/flush/rename described in the module docs. On failure the
    /// temporary file is removed best-effort; the previous entry, if any,
    /// is left intact.
    pub fn set(&self, path: &Path, content: &str) -> Result<(), CacheError> {
        let digest = Fingerprint::from_bytes(content.as_bytes());

        fs::create_dir_all(&self.entries_dir).map_err(|source| CacheError::DirCreate {
            path: self.entries_dir.clone(),
            source,
        })?;

        let entry = self.entry_path(path);
        let temp = self.temp_path(&entry);

        if let Err(source) = write_flushed(&temp, digest) {
            let _ = fs::remove_file(&temp);
            return Err(CacheError::EntryWrite { path: temp, source });
        }

        if let Err(source) = fs::rename(&temp, &entry) {
            let _ = fs::remove_file(&temp);
            return Err(CacheError::EntryWrite {
                path: entry,
                source,
            });
        }

        trace!("cache entry updated: {} -> {digest}", path.display());
        Ok(())
    }

    /// Unique temporary sibling of `entry`, so the final rename never
    /// crosses a filesystem boundary.
    fn temp_path(&self, entry: &Path) -> PathBuf {
        let stem = entry
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.entries_dir
            .join(format!(".{stem}.{}.{seq}.tmp", std::process::id()))
    }
}

/// Write the digest and flush it all the way to disk.
fn write_flushed(path: &Path, digest: Fingerprint) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    writeln!(file, "{digest}")?;
    file.sync_all()
}
