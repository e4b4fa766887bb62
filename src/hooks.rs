//! Extension points around the render/write cycle.
//!
//! Four optional hooks, each invoked at most once per compile call, in this
//! fixed order:
//!
//! 1. `before_render`: may mutate the data record (inject defaults,
//!    computed fields) before the page capability sees it.
//! 2. `after_render`: may rewrite the rendered HTML (post-processing,
//!    markup rewriting, minification via an external tool).
//! 3. `before_write`: may redirect the output path.
//! 4. `after_write`: observation only (logging, notification); runs after
//!    a successful write, never after a skip.
//!
//! Hooks run synchronously on the compile call stack; there is no queue and
//! no isolation. A hook returning an error aborts the compile with that
//! error. Absent hooks cost nothing.
//!
//! ```
//! use imprint::hooks::Hooks;
//! use serde_json::Value;
//!
//! let hooks = Hooks::new()
//!     .before_render(|data| {
//!         data.entry("lang").or_insert(Value::from("en"));
//!         Ok(())
//!     })
//!     .after_render(|_data, html| {
//!         html.push_str("<!-- built -->");
//!         Ok(())
//!     });
//! ```

use crate::types::DataRecord;
use std::path::{Path, PathBuf};

/// Error type produced by hook callables.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

type BeforeRenderFn = dyn FnMut(&mut DataRecord) -> Result<(), HookError>;
type AfterRenderFn = dyn FnMut(&DataRecord, &mut String) -> Result<(), HookError>;
type BeforeWriteFn = dyn FnMut(&DataRecord, &mut PathBuf) -> Result<(), HookError>;
type AfterWriteFn = dyn FnMut(&Path, u64) -> Result<(), HookError>;

/// The hook pipeline for a [`BuildEngine`](crate::engine::BuildEngine).
///
/// Hooks are plain function-valued fields set at construction, so presence
/// or absence is visible where the engine is built, and every slot defaults to
/// a no-op.
#[derive(Default)]
pub struct Hooks {
    before_render: Option<Box<BeforeRenderFn>>,
    after_render: Option<Box<AfterRenderFn>>,
    before_write: Option<Box<BeforeWriteFn>>,
    after_write: Option<Box<AfterWriteFn>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs before the page capability is invoked; may mutate the record.
    pub fn before_render(
        mut self,
        hook: impl FnMut(&mut DataRecord) -> Result<(), HookError> + 'static,
    ) -> Self {
        self.before_render = Some(Box::new(hook));
        self
    }

    /// Runs after rendering; may mutate the HTML.
    pub fn after_render(
        mut self,
        hook: impl FnMut(&DataRecord, &mut String) -> Result<(), HookError> + 'static,
    ) -> Self {
        self.after_render = Some(Box::new(hook));
        self
    }

    /// Runs after path resolution; may redirect the output path.
    pub fn before_write(
        mut self,
        hook: impl FnMut(&DataRecord, &mut PathBuf) -> Result<(), HookError> + 'static,
    ) -> Self {
        self.before_write = Some(Box::new(hook));
        self
    }

    /// Runs after a successful write with the final path and byte count.
    pub fn after_write(
        mut self,
        hook: impl FnMut(&Path, u64) -> Result<(), HookError> + 'static,
    ) -> Self {
        self.after_write = Some(Box::new(hook));
        self
    }

    pub(crate) fn run_before_render(&mut self, data: &mut DataRecord) -> Result<(), HookError> {
        match &mut self.before_render {
            Some(hook) => hook(data),
            None => Ok(()),
        }
    }

    pub(crate) fn run_after_render(
        &mut self,
        data: &DataRecord,
        html: &mut String,
    ) -> Result<(), HookError> {
        match &mut self.after_render {
            Some(hook) => hook(data, html),
            None => Ok(()),
        }
    }

    pub(crate) fn run_before_write(
        &mut self,
        data: &DataRecord,
        path: &mut PathBuf,
    ) -> Result<(), HookError> {
        match &mut self.before_write {
            Some(hook) => hook(data, path),
            None => Ok(()),
        }
    }

    pub(crate) fn run_after_write(&mut self, path: &Path, bytes: u64) -> Result<(), HookError> {
        match &mut self.after_write {
            Some(hook) => hook(path, bytes),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::record;
    use serde_json::{Value, json};

    #[test]
    fn absent_hooks_are_noops() {
        let mut hooks = Hooks::new();
        let mut data = record(json!({"k": "v"}));
        let mut html = "<p>hi</p>".to_string();
        let mut path = PathBuf::from("/out/a.html");

        hooks.run_before_render(&mut data).unwrap();
        hooks.run_after_render(&data, &mut html).unwrap();
        hooks.run_before_write(&data, &mut path).unwrap();
        hooks.run_after_write(&path, 7).unwrap();

        assert_eq!(data, record(json!({"k": "v"})));
        assert_eq!(html, "<p>hi</p>");
        assert_eq!(path, PathBuf::from("/out/a.html"));
    }

    #[test]
    fn before_render_mutates_record() {
        let mut hooks = Hooks::new().before_render(|data| {
            data.insert("injected".into(), Value::from(true));
            Ok(())
        });
        let mut data = record(json!({}));
        hooks.run_before_render(&mut data).unwrap();
        assert_eq!(data["injected"], true);
    }

    #[test]
    fn after_render_mutates_html() {
        let mut hooks = Hooks::new().after_render(|_, html| {
            *html = html.to_uppercase();
            Ok(())
        });
        let data = record(json!({}));
        let mut html = "abc".to_string();
        hooks.run_after_render(&data, &mut html).unwrap();
        assert_eq!(html, "ABC");
    }

    #[test]
    fn before_write_redirects_path() {
        let mut hooks = Hooks::new().before_write(|_, path| {
            *path = PathBuf::from("/elsewhere/b.html");
            Ok(())
        });
        let data = record(json!({}));
        let mut path = PathBuf::from("/out/a.html");
        hooks.run_before_write(&data, &mut path).unwrap();
        assert_eq!(path, PathBuf::from("/elsewhere/b.html"));
    }

    #[test]
    fn hook_error_propagates() {
        let mut hooks = Hooks::new().before_render(|_| Err("refused".into()));
        let mut data = record(json!({}));
        let err = hooks.run_before_render(&mut data).unwrap_err();
        assert_eq!(err.to_string(), "refused");
    }

    #[test]
    fn stateful_hook_observes_every_call() {
        use std::cell::Cell;
        use std::rc::Rc;

        let count = Rc::new(Cell::new(0u32));
        let seen = count.clone();
        let mut hooks = Hooks::new().after_write(move |_, _| {
            seen.set(seen.get() + 1);
            Ok(())
        });

        hooks.run_after_write(Path::new("/out/a.html"), 1).unwrap();
        hooks.run_after_write(Path::new("/out/b.html"), 2).unwrap();
        assert_eq!(count.get(), 2);
    }
}
