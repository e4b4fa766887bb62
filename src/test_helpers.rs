//! Shared test utilities for the imprint test suite.
//!
//! Record builders and tempdir-scoped configuration so tests exercise the
//! pipeline against isolated filesystem roots.

use crate::config::BuildConfig;
use crate::types::DataRecord;
use tempfile::TempDir;

/// Build a [`DataRecord`] from a `json!` object literal.
///
/// Panics if the value is not a JSON object, which is a test bug rather
/// than a runtime condition.
pub fn record(value: serde_json::Value) -> DataRecord {
    value
        .as_object()
        .cloned()
        .unwrap_or_else(|| panic!("test record must be a JSON object, got: {value}"))
}

/// A [`BuildConfig`] rooted inside a temp directory: output under
/// `<tmp>/public`, cache under `<tmp>/cache`, default delimiters.
pub fn config_in(tmp: &TempDir) -> BuildConfig {
    BuildConfig {
        build_root: tmp.path().join("public"),
        cache_root: tmp.path().join("cache"),
        ..Default::default()
    }
}
