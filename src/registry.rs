//! Page capabilities and their registry.
//!
//! A [`Page`] is the one thing the engine requires from the outside world: a
//! callable that deterministically turns a data record into an HTML string.
//! How the HTML is produced (a template engine, a component tree, a plain
//! `format!`) is invisible to the engine, and must be a pure function of
//! the record for the skip-on-unchanged guarantee to hold. Side effects
//! inside a page are the caller's responsibility.
//!
//! [`PageRegistry`] is the resolution boundary: front-ends register
//! capabilities by name and resolve them before constructing a
//! [`BuildEngine`](crate::engine::BuildEngine). The engine itself never
//! performs lookups; it is handed an already-resolved capability.

use crate::types::DataRecord;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Error type produced by page capabilities.
pub type PageError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("No page component registered under '{0}'")]
    UnknownComponent(String),
}

/// A page component: data record in, HTML string out.
pub trait Page {
    fn invoke(&self, data: &DataRecord) -> Result<String, PageError>;
}

impl<P: Page + ?Sized> Page for &P {
    fn invoke(&self, data: &DataRecord) -> Result<String, PageError> {
        (**self).invoke(data)
    }
}

impl<P: Page + ?Sized> Page for Box<P> {
    fn invoke(&self, data: &DataRecord) -> Result<String, PageError> {
        (**self).invoke(data)
    }
}

impl<P: Page + ?Sized> Page for Arc<P> {
    fn invoke(&self, data: &DataRecord) -> Result<String, PageError> {
        (**self).invoke(data)
    }
}

/// A [`Page`] backed by a plain closure. Build one with [`page_fn`].
pub struct FnPage<F>(F);

impl<F> Page for FnPage<F>
where
    F: Fn(&DataRecord) -> Result<String, PageError>,
{
    fn invoke(&self, data: &DataRecord) -> Result<String, PageError> {
        (self.0)(data)
    }
}

/// Wrap a closure as a page capability.
///
/// ```
/// use imprint::registry::{Page, page_fn};
/// use serde_json::json;
///
/// let page = page_fn(|data| Ok(format!("<h1>{}</h1>", data["title"].as_str().unwrap_or(""))));
/// let record = json!({"title": "Hi"}).as_object().cloned().unwrap();
/// assert_eq!(page.invoke(&record).unwrap(), "<h1>Hi</h1>");
/// ```
pub fn page_fn<F>(f: F) -> FnPage<F>
where
    F: Fn(&DataRecord) -> Result<String, PageError>,
{
    FnPage(f)
}

/// Name → capability map standing at the collaborator boundary.
#[derive(Default)]
pub struct PageRegistry {
    pages: HashMap<String, Arc<dyn Page + Send + Sync>>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability under `name`, replacing any previous holder.
    pub fn register(&mut self, name: impl Into<String>, page: impl Page + Send + Sync + 'static) {
        self.pages.insert(name.into(), Arc::new(page));
    }

    /// Resolve a capability by name.
    ///
    /// An unknown name is fatal: there is nothing sensible to build
    /// without a component.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Page + Send + Sync>, RegistryError> {
        self.pages
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownComponent(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }
}
