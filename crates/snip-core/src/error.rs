//! Scan diagnostics and the terminal parse failure.

use crate::descriptor::RangeKey;

/// A single structural problem found during a scan.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// Marker named a range kind outside the configured allow-list.
    #[error("unknown range kind `{kind}`")]
    WrongType {
        /// Kind as written in the marker.
        kind: String,
    },

    /// Range name is not a single word.
    #[error("invalid range name `{name}`")]
    WrongName {
        /// Name as written in the marker.
        name: String,
    },

    /// A key was opened again while still open. The first accumulator
    /// is kept untouched.
    #[error("range `{key}` opened again before being closed")]
    DuplicateBegin {
        /// Key opened twice.
        key: RangeKey,
    },

    /// A close marker named a key with no open entry.
    #[error("range `{key}` closed but not open")]
    UnmatchedEnd {
        /// Key the marker tried to close.
        key: RangeKey,
    },

    /// A bare close marker arrived with no brace-opened range left.
    #[error("close marker with no open brace range")]
    UnmatchedBareClose,

    /// A key was still open when the input ended.
    #[error("range `{key}` opened at line {opened_at} and never closed")]
    UnclosedAtEof {
        /// Key left open.
        key: RangeKey,
        /// Physical input line of the opening marker.
        opened_at: u32,
    },
}

/// A diagnostic tied to the physical input line that produced it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseDiagnostic {
    /// 1-based physical line in the scanned input.
    pub line: u32,
    /// What went wrong there.
    pub kind: ParseErrorKind,
}

/// Terminal failure for one file.
///
/// Scanning records problems and keeps going, so one pass surfaces
/// every issue in the file; a file that produced any diagnostic yields
/// no descriptor at all.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", render(.errors))]
pub struct ParseFailure {
    /// Collected diagnostics in source order; never empty.
    pub errors: Vec<ParseDiagnostic>,
}

fn render(errors: &[ParseDiagnostic]) -> String {
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!("{} directive error(s): {}", errors.len(), details.join("; "))
}
