//! Build orchestration.
//!
//! [`BuildEngine`] drives one output file per [`DataRecord`] through the
//! render/write cycle:
//!
//! ```text
//! before_render → render → after_render → resolve path → before_write
//!     → ensure parent dir → cache compare → (skip | write + cache update
//!     → after_write)
//! ```
//!
//! The skip decision is the crate's reason to exist: when the fingerprint of
//! the freshly rendered content equals the cached fingerprint for the
//! resolved path, no file is written and the cache entry is left untouched:
//! repeated compiles of unchanged data never touch disk beyond the entry
//! read. That guarantee requires the page capability to be a pure function
//! of its record.
//!
//! ## Paths
//!
//! The resolved pattern is joined under the configured build root. Patterns
//! are trusted input from the site author; the engine does not sanitize
//! `..` segments.
//!
//! ## Scheduling
//!
//! Everything is synchronous, single-threaded, blocking I/O.
//! [`build_many`](BuildEngine::build_many) is a strictly sequential loop. A
//! caller layering concurrency on top must serialize compiles per output
//! path: the cache read-compare-write is not transactional, and the atomic
//! entry rename in [`ContentCache`](crate::cache::ContentCache) is the only
//! cross-process safety mechanism provided.

use crate::cache::{CacheError, ContentCache};
use crate::config::BuildConfig;
use crate::fingerprint::Fingerprint;
use crate::hooks::{HookError, Hooks};
use crate::registry::{Page, PageError};
use crate::resolve::{Delimiters, resolve};
use crate::types::DataRecord;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("{hook} hook failed: {source}")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },
    #[error("Page render failed: {0}")]
    Render(#[source] PageError),
    #[error("Failed to create output directory {path}: {source}")]
    DirCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
    #[error("Failed to write output file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of one compile call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildResult {
    /// The output file was written; carries the byte count.
    Written(u64),
    /// Content was unchanged since the last build; nothing touched disk.
    Skipped,
}

impl BuildResult {
    /// Bytes written; zero for [`Skipped`](BuildResult::Skipped).
    pub fn bytes(&self) -> u64 {
        match self {
            BuildResult::Written(bytes) => *bytes,
            BuildResult::Skipped => 0,
        }
    }
}

/// Compiles page components to files on disk, skipping unchanged output.
///
/// The page capability, configuration value, and hook pipeline are all
/// injected at construction; the engine holds no global state, so
/// independent engines never interfere.
pub struct BuildEngine<P: Page> {
    page: P,
    config: BuildConfig,
    cache: ContentCache,
    hooks: Hooks,
    delimiters: Delimiters,
}

impl<P: Page> BuildEngine<P> {
    /// Engine with no hooks.
    pub fn new(page: P, config: BuildConfig) -> Self {
        Self::with_hooks(page, config, Hooks::new())
    }

    /// Engine with a hook pipeline.
    pub fn with_hooks(page: P, config: BuildConfig, hooks: Hooks) -> Self {
        let cache = ContentCache::new(config.cache_root.clone());
        let delimiters = config.delimiter_pair();
        Self {
            page,
            config,
            cache,
            hooks,
            delimiters,
        }
    }

    /// Compile one record using the configured delimiter pair.
    pub fn compile(
        &mut self,
        pattern: &str,
        data: DataRecord,
    ) -> Result<BuildResult, BuildError> {
        let delimiters = self.delimiters.clone();
        self.compile_with(pattern, data, &delimiters)
    }

    /// Compile one record: render, run hooks, and write the output file
    /// unless its content fingerprint matches the cache.
    pub fn compile_with(
        &mut self,
        pattern: &str,
        mut data: DataRecord,
        delimiters: &Delimiters,
    ) -> Result<BuildResult, BuildError> {
        self.hooks
            .run_before_render(&mut data)
            .map_err(|source| BuildError::Hook {
                hook: "before_render",
                source,
            })?;

        let mut html = self.page.invoke(&data).map_err(BuildError::Render)?;

        self.hooks
            .run_after_render(&data, &mut html)
            .map_err(|source| BuildError::Hook {
                hook: "after_render",
                source,
            })?;

        let relative = resolve(pattern, &data, delimiters);
        let mut path = self.config.build_root.join(relative.trim_start_matches('/'));

        self.hooks
            .run_before_write(&data, &mut path)
            .map_err(|source| BuildError::Hook {
                hook: "before_write",
                source,
            })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::DirCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let digest = Fingerprint::from_bytes(html.as_bytes());
        if self.cache.get(&path)? == Some(digest) {
            debug!("unchanged, skipping: {}", path.display());
            return Ok(BuildResult::Skipped);
        }

        fs::write(&path, &html).map_err(|source| BuildError::Write {
            path: path.clone(),
            source,
        })?;
        let bytes = html.len() as u64;

        self.cache.set(&path, &html)?;

        self.hooks
            .run_after_write(&path, bytes)
            .map_err(|source| BuildError::Hook {
                hook: "after_write",
                source,
            })?;

        debug!("wrote {} ({bytes} bytes)", path.display());
        Ok(BuildResult::Written(bytes))
    }

    /// Compile every record in `dataset`, in order, with the configured
    /// delimiter pair.
    pub fn build_many<I>(&mut self, pattern: &str, dataset: I) -> Result<BuildResult, BuildError>
    where
        I: IntoIterator<Item = DataRecord>,
    {
        let delimiters = self.delimiters.clone();
        self.build_many_with(pattern, dataset, &delimiters)
    }

    /// Sequentially compile a dataset, summing bytes written.
    ///
    /// The first failure short-circuits and propagates as-is; no partial
    /// aggregate is returned, though files written by earlier records remain
    /// on disk. Skipped compiles contribute zero bytes.
    pub fn build_many_with<I>(
        &mut self,
        pattern: &str,
        dataset: I,
        delimiters: &Delimiters,
    ) -> Result<BuildResult, BuildError>
    where
        I: IntoIterator<Item = DataRecord>,
    {
        let mut total = 0u64;
        for data in dataset {
            total += self.compile_with(pattern, data, delimiters)?.bytes();
        }
        Ok(BuildResult::Written(total))
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }
}
