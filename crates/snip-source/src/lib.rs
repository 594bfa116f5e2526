//! Source acquisition for excerpt scanning.
//!
//! [`Source`] abstracts where marked-up text comes from, so the
//! scanning side never touches the filesystem or external tools
//! directly:
//!
//! - [`FsSource`]: local files, tolerant of a UTF-8 byte-order mark
//! - [`GitSource`]: historical blobs fetched through the `git` tool
//! - [`SystemSource`]: dispatches on the `git|` reference prefix
//! - [`MockSource`] (feature `mock`): in-memory contents for tests
//!
//! A reference is either a plain path (`src/lexer.rs`) or a tagged
//! version-control object identifier (`git|v1.2:src/lexer.rs`).

mod fs;
mod git;
#[cfg(feature = "mock")]
mod mock;

use std::io;
use std::time::Duration;

pub use fs::FsSource;
pub use git::GitSource;
#[cfg(feature = "mock")]
pub use mock::MockSource;

/// Reference prefix marking a version-control object identifier.
pub const GIT_REF_PREFIX: &str = "git|";

/// Where source text is read from.
///
/// Implementations are injectable: repositories accept any `Source`,
/// so tests substitute an in-memory provider and hosts can add their
/// own acquisition schemes.
pub trait Source: Send + Sync {
    /// Materialize the full text behind `file_ref`.
    ///
    /// # Errors
    ///
    /// [`SourceError::NotFound`] when the reference does not resolve to
    /// readable text, [`SourceError::ToolFailure`] when an external
    /// tool misbehaves.
    fn read(&self, file_ref: &str) -> Result<String, SourceError>;
}

/// Acquisition failure for one reference. Immediate and final: nothing
/// is retried.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The reference does not resolve to readable text.
    #[error("cannot read `{reference}`: {cause}")]
    NotFound {
        /// Reference as given by the caller.
        reference: String,
        /// Underlying I/O error.
        #[source]
        cause: io::Error,
    },

    /// The external version-control tool failed, hung past its bounded
    /// wait, or produced undecodable output.
    #[error("git retrieval of `{reference}` failed: {detail}")]
    ToolFailure {
        /// Object identifier handed to the tool.
        reference: String,
        /// What the tool reported.
        detail: String,
    },
}

/// Default provider: local files plus `git|`-tagged blobs.
///
/// Both paths produce plain text that feeds the same scan.
#[derive(Clone, Debug, Default)]
pub struct SystemSource {
    fs: FsSource,
    git: GitSource,
}

impl SystemSource {
    /// Provider with the default blob-retrieval timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider with a custom bound on blob retrieval.
    #[must_use]
    pub fn with_git_timeout(timeout: Duration) -> Self {
        Self {
            fs: FsSource,
            git: GitSource::new(timeout),
        }
    }
}

impl Source for SystemSource {
    fn read(&self, file_ref: &str) -> Result<String, SourceError> {
        match file_ref.strip_prefix(GIT_REF_PREFIX) {
            Some(object) => self.git.read(object),
            None => self.fs.read(file_ref),
        }
    }
}
