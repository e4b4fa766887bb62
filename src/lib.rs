//! # Imprint
//!
//! An incremental build engine for component-based static sites: page
//! components (pure functions from a data record to an HTML string) are
//! compiled to files on disk, and output whose content hasn't changed since
//! the last build is never rewritten.
//!
//! # Architecture: The Compile Cycle
//!
//! Every output file is one pass through the same cycle, driven by
//! [`engine::BuildEngine::compile`]:
//!
//! ```text
//! 1. Resolve    pattern + record  →  output path   (placeholder substitution)
//! 2. Render     record            →  HTML          (page capability)
//! 3. Compare    hash(HTML) vs cache entry for path
//! 4. Write      only on change; then update the cache entry atomically
//! ```
//!
//! [`engine::BuildEngine::build_many`] drives the cycle per-record over a
//! dataset, sequentially.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Orchestration: resolve → render → hooks → compare → write, plus the dataset loop |
//! | [`cache`] | Per-path content fingerprints on disk, updated via atomic rename |
//! | [`resolve`] | Placeholder substitution in output-path patterns (`{{slug}}`) |
//! | [`fingerprint`] | 128-bit XXH3 digests for the cache's keys and values |
//! | [`hooks`] | `before_render` / `after_render` / `before_write` / `after_write` extension points |
//! | [`registry`] | The `Page` capability trait and name→capability resolution |
//! | [`config`] | Explicit `BuildConfig` value (build root, cache root, delimiters) |
//! | [`types`] | `DataRecord`, the unit of input |
//!
//! # Design Decisions
//!
//! ## Fingerprints Over Timestamps
//!
//! Change detection compares content digests, not modification times, so it
//! survives `git checkout` (which resets mtimes) and re-renders that produce
//! byte-identical output. XXH3 is fast enough that hashing is never the
//! bottleneck; this is a freshness check, not a security boundary.
//!
//! ## Atomic Cache Updates
//!
//! Cache entries are replaced by writing a temporary sibling file, flushing
//! it, and renaming over the target. A crash mid-update leaves either the
//! old complete entry or the new complete one, never a torn value that
//! would poison future skip decisions. See [`cache`].
//!
//! ## Explicit Configuration, Injected Capabilities
//!
//! There is no process-wide state: [`config::BuildConfig`] is a plain value
//! passed into constructors, and the engine is handed an already-resolved
//! [`registry::Page`] capability rather than a name to look up. Tests and
//! embedders construct independent engines that cannot interfere, and
//! "resetting" is just constructing a fresh instance.
//!
//! ## Hooks As Function Values
//!
//! Extension points are optional function-valued fields on
//! [`hooks::Hooks`], not overridable methods on a base class. Presence is
//! visible at the construction site, absent hooks cost nothing, and there
//! is no virtual dispatch in the hot path.
//!
//! # What Imprint Is Not
//!
//! Template parsing, routing, serving, asset pipelines, and CLI front-ends
//! all live outside this crate. A front-end renders however it likes and
//! registers the result as a [`registry::Page`]; imprint only decides what
//! lands on disk.

pub mod cache;
pub mod config;
pub mod engine;
pub mod fingerprint;
pub mod hooks;
pub mod registry;
pub mod resolve;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
