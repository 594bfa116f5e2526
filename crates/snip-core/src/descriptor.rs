//! Parsed file descriptors.

use std::collections::HashMap;
use std::fmt;

use crate::line::Line;

/// Identity of one extractable range: a kind from the configured
/// allow-list plus a `\w+` name.
///
/// At most one range per key may be open at a time during a scan.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeKey {
    /// Range category, e.g. `range`.
    pub kind: String,
    /// Range name.
    pub name: String,
}

impl RangeKey {
    /// Create a key.
    #[must_use]
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// The parsed result for one file: every line of the file plus every
/// named range found in it.
///
/// Built once per file reference and immutable afterwards; repositories
/// cache descriptors for the lifetime of the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Descriptor {
    whole_file: Vec<Line>,
    ranges: HashMap<String, HashMap<String, Vec<Line>>>,
}

impl Descriptor {
    pub(crate) fn new(
        whole_file: Vec<Line>,
        ranges: HashMap<String, HashMap<String, Vec<Line>>>,
    ) -> Self {
        Self { whole_file, ranges }
    }

    /// All content lines of the file, in order.
    #[must_use]
    pub fn whole_file(&self) -> &[Line] {
        &self.whole_file
    }

    /// Lines of the range `(kind, name)`, or `None` if the file never
    /// opened that key.
    #[must_use]
    pub fn lines(&self, kind: &str, name: &str) -> Option<&[Line]> {
        self.ranges.get(kind)?.get(name).map(Vec::as_slice)
    }

    /// Names of every range of `kind`, in no particular order.
    pub fn names(&self, kind: &str) -> impl Iterator<Item = &str> {
        self.ranges
            .get(kind)
            .into_iter()
            .flat_map(|ranges| ranges.keys().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_key_display() {
        assert_eq!(RangeKey::new("range", "setup").to_string(), "range/setup");
    }

    #[test]
    fn test_missing_range_is_none() {
        let descriptor = Descriptor::default();
        assert_eq!(descriptor.lines("range", "missing"), None);
        assert_eq!(descriptor.names("range").count(), 0);
    }
}
