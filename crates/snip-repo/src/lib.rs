//! Cached excerpt repository.
//!
//! [`Repository`] is the façade hosts call: it resolves a file
//! reference through a [`Source`], scans it once with
//! [`snip_core::Parser`], and memoizes the resulting [`Descriptor`]
//! for the lifetime of the process. Individual `fetch*` calls then
//! answer from the cached descriptor.
//!
//! # Cache semantics
//!
//! The cache key is the literal reference string, unnormalized:
//! `src/a.rs` and `./src/a.rs` are separate entries and are parsed
//! separately. References are spelled by document authors, and keeping
//! lookups free of path resolution makes the mapping between document
//! and cache entry exact; this is intentional, not an oversight. The
//! cache is unbounded; the set of files referenced by one build is
//! small.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use snip_repo::{Repository, RepositoryConfig};
//! use snip_source::MockSource;
//!
//! let source = MockSource::new().with_file(
//!     "hello.rs",
//!     "fn main() {\n#@range_begin(body)\n    greet();\n#@range_end(body)\n}\n",
//! );
//! let repo = Repository::with_source(RepositoryConfig::default(), Arc::new(source));
//!
//! let body = repo.fetch_range("hello.rs", "body").unwrap().unwrap();
//! assert_eq!(body.len(), 1);
//! assert_eq!(body[0].text, "    greet();");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use snip_core::{Descriptor, Line, ParseFailure, ParseOptions, Parser};
use snip_source::{GIT_REF_PREFIX, Source, SourceError, SystemSource};

/// Repository configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepositoryConfig {
    /// Column width for tab expansion; 0 leaves tabs untouched.
    pub tab_width: usize,
    /// Allowed range kinds.
    pub kinds: Vec<String>,
    /// File extensions whose content is taken verbatim: no tab
    /// expansion, no trailing-whitespace strip.
    pub verbatim_extensions: Vec<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            tab_width: 8,
            kinds: vec!["range".to_owned()],
            verbatim_extensions: Vec::new(),
        }
    }
}

/// Why a fetch produced no lines.
///
/// A reference that scans cleanly but lacks the requested range is not
/// an error; `fetch` reports that as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The reference could not be materialized.
    #[error("{0}")]
    Source(#[from] SourceError),

    /// The file was read but its markers are broken; carries every
    /// diagnostic found in the pass.
    #[error("`{reference}`: {failure}")]
    Parse {
        /// Reference as given by the caller.
        reference: String,
        /// Full diagnostic list.
        failure: ParseFailure,
    },
}

/// Memoizing façade over source acquisition and scanning.
///
/// `fetch*` calls are serialized through a mutex-guarded cache map, so
/// read-cache-or-parse-then-memoize is atomic per reference: concurrent
/// callers cannot trigger duplicate parses of one file or interleave
/// writes to one slot. Parsing is not a hot path; the coarse lock is
/// deliberate.
pub struct Repository {
    config: RepositoryConfig,
    source: Arc<dyn Source>,
    cache: Mutex<HashMap<String, Arc<Descriptor>>>,
}

impl Repository {
    /// Repository over local files and `git|` blobs.
    #[must_use]
    pub fn new(config: RepositoryConfig) -> Self {
        Self::with_source(config, Arc::new(SystemSource::new()))
    }

    /// Repository over an injected source provider.
    #[must_use]
    pub fn with_source(config: RepositoryConfig, source: Arc<dyn Source>) -> Self {
        Self {
            config,
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Whole-file lines for `file_ref`.
    ///
    /// # Errors
    ///
    /// [`FetchError`] when the reference cannot be read or scanned.
    pub fn fetch_whole_file(&self, file_ref: &str) -> Result<Vec<Line>, FetchError> {
        Ok(self.descriptor(file_ref)?.whole_file().to_vec())
    }

    /// Lines of the named `range`-kind range, if the file has it.
    ///
    /// # Errors
    ///
    /// [`FetchError`] when the reference cannot be read or scanned.
    pub fn fetch_range(&self, file_ref: &str, name: &str) -> Result<Option<Vec<Line>>, FetchError> {
        self.fetch(file_ref, "range", name)
    }

    /// Lines of the range `(kind, name)`, or `None` if the file never
    /// opened that key: a valid miss, distinct from a file-level
    /// failure.
    ///
    /// # Errors
    ///
    /// [`FetchError`] when the reference cannot be read or scanned.
    pub fn fetch(
        &self,
        file_ref: &str,
        kind: &str,
        name: &str,
    ) -> Result<Option<Vec<Line>>, FetchError> {
        Ok(self
            .descriptor(file_ref)?
            .lines(kind, name)
            .map(<[Line]>::to_vec))
    }

    /// The parsed descriptor for `file_ref`, shared with the cache.
    ///
    /// Parses on first use; later calls for the same literal reference
    /// answer from memory without touching the source again.
    ///
    /// # Errors
    ///
    /// [`FetchError`] when the reference cannot be read or scanned.
    /// Failures are not memoized: a broken reference reports its
    /// diagnostics again on every fetch.
    pub fn descriptor(&self, file_ref: &str) -> Result<Arc<Descriptor>, FetchError> {
        let mut cache = self.cache.lock().unwrap();
        if let Some(descriptor) = cache.get(file_ref) {
            return Ok(Arc::clone(descriptor));
        }

        let text = self.source.read(file_ref)?;
        let options = ParseOptions {
            tab_width: self.config.tab_width,
            verbatim: self.is_verbatim(file_ref),
            kinds: self.config.kinds.clone(),
        };
        let descriptor =
            Parser::new(options)
                .parse(&text)
                .map_err(|failure| FetchError::Parse {
                    reference: file_ref.to_owned(),
                    failure,
                })?;
        tracing::debug!(
            reference = file_ref,
            lines = descriptor.whole_file().len(),
            "scanned source"
        );

        let descriptor = Arc::new(descriptor);
        cache.insert(file_ref.to_owned(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Verbatim is decided by extension; for `git|rev:path` references
    /// the extension of the path part.
    fn is_verbatim(&self, file_ref: &str) -> bool {
        let path = file_ref.strip_prefix(GIT_REF_PREFIX).map_or(file_ref, |object| {
            object
                .split_once(':')
                .map_or(object, |(_, path)| path)
        });
        match path.rsplit_once('.') {
            Some((_, extension)) => self
                .config
                .verbatim_extensions
                .iter()
                .any(|candidate| candidate == extension),
            None => false,
        }
    }
}
