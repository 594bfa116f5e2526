//! Filesystem-backed source.

use std::fs;

use crate::{Source, SourceError};

/// Reads references as local file paths.
///
/// A leading UTF-8 byte-order mark is dropped, so files saved by
/// BOM-writing editors scan like any other file.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSource;

impl Source for FsSource {
    fn read(&self, file_ref: &str) -> Result<String, SourceError> {
        let text = fs::read_to_string(file_ref).map_err(|cause| SourceError::NotFound {
            reference: file_ref.to_owned(),
            cause,
        })?;
        Ok(strip_bom(text))
    }
}

fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_owned(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_reads_file_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, "hello\nworld\n").unwrap();

        let text = FsSource.read(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "hello\nworld\n");
    }

    #[test]
    fn test_strips_leading_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, "\u{feff}content\n").unwrap();

        let text = FsSource.read(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "content\n");
    }

    #[test]
    fn test_bom_only_stripped_at_start() {
        assert_eq!(strip_bom("a\u{feff}b".to_owned()), "a\u{feff}b");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = FsSource.read("definitely/not/here.txt");
        assert!(matches!(result, Err(SourceError::NotFound { .. })));
    }
}
