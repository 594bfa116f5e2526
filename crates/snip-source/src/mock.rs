//! In-memory source for tests.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Source, SourceError};

/// In-memory [`Source`] with a read counter.
///
/// Use the builder methods to register contents, then observe how
/// often consumers actually hit the source.
///
/// # Example
///
/// ```
/// use snip_source::{MockSource, Source};
///
/// let source = MockSource::new().with_file("demo.rs", "fn main() {}\n");
/// assert_eq!(source.read("demo.rs").unwrap(), "fn main() {}\n");
/// assert_eq!(source.reads(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    contents: HashMap<String, String>,
    reads: AtomicUsize,
}

impl MockSource {
    /// Empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register content for a reference.
    #[must_use]
    pub fn with_file(mut self, file_ref: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents.insert(file_ref.into(), content.into());
        self
    }

    /// Number of `read` calls served so far, hits and misses alike.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Source for MockSource {
    fn read(&self, file_ref: &str) -> Result<String, SourceError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.contents
            .get(file_ref)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                reference: file_ref.to_owned(),
                cause: io::Error::new(io::ErrorKind::NotFound, "no mock content"),
            })
    }
}
