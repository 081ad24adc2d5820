//! CalendarSource trait definition.
//!
//! This module defines the [`CalendarSource`] trait, the seam between the
//! pipeline and whatever actually moves bytes (HTTP in production, canned
//! bodies in tests).
//!
//! A source only performs the read. Building the request address and decoding
//! the body are done by the caller, see [`crate::ergast`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use crate::error::{ProviderError, ProviderResult};

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so sources can be held as
/// `Arc<dyn CalendarSource>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A read-only source of calendar documents.
///
/// # Example Implementation
///
/// ```ignore
/// struct FileSource { root: PathBuf }
///
/// impl CalendarSource for FileSource {
///     fn name(&self) -> &str { "file" }
///
///     fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
///         Box::pin(async move { /* read the file behind `url` */ })
///     }
/// }
/// ```
pub trait CalendarSource: Send + Sync {
    /// Returns the name/type of this source (e.g., "http").
    fn name(&self) -> &str;

    /// Reads the document at `url` and returns its body.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport failures and non-success
    /// responses.
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProviderResult<String>>;
}

/// A source that always returns the same body.
///
/// Requested addresses are recorded so tests can check what was asked for.
#[derive(Debug)]
pub struct StaticSource {
    body: String,
    requests: Mutex<Vec<String>>,
}

impl StaticSource {
    /// Creates a source answering every request with `body`.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the addresses requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl CalendarSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        let body = self.body.clone();
        Box::pin(async move { Ok(body) })
    }
}

/// A source that always returns an error.
///
/// This is useful for testing or as a placeholder when a source
/// fails to initialize.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: ProviderError,
}

impl ErrorSource {
    /// Creates a new error source.
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl CalendarSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
        // Rebuild the error since ProviderError is not Clone
        let error =
            ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name);
        Box::pin(async move { Err(error) })
    }
}
