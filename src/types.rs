//! Shared types used across the build pipeline.
//!
//! A [`DataRecord`] is the unit of input: one record per output file. Records
//! enter [`compile`](crate::engine::BuildEngine::compile), flow through the
//! hook pipeline (which may mutate them in place), feed placeholder
//! substitution in the output-path pattern, and are handed to the page
//! capability for rendering. The engine never retains a record beyond the
//! compile call that consumed it.

use serde_json::Value;

/// Caller-supplied data for one build unit.
///
/// A string-keyed mapping with no implied schema; values may be scalars or
/// nested records. Built by the caller, typically from deserialized content
/// front-matter or an application database row:
///
/// ```
/// use imprint::types::DataRecord;
/// use serde_json::json;
///
/// let record: DataRecord = json!({ "slug": "hello", "title": "Hello" })
///     .as_object()
///     .cloned()
///     .unwrap();
/// assert_eq!(record["slug"], "hello");
/// ```
pub type DataRecord = serde_json::Map<String, Value>;
