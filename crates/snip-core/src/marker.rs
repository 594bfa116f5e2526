//! Line-marker recognition.
//!
//! Classifies a raw input line into a tagged [`Marker`] event. Rules
//! are evaluated in a fixed priority order and the first match wins; a
//! line matching none of them is ordinary content.
//!
//! Markers live behind the `#@` prefix at the start of a line, or
//! behind `#@@` anywhere in it. The doubled variant exists so markers
//! can ride inside the host language's own comment syntax
//! (`/* #@@range_begin(x) */`), which is also why every rule tolerates
//! trailing text after the marker.

use std::sync::LazyLock;

use regex::Regex;

static BEGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)_begin\(([^)]*)\)").unwrap());
static END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+)_end\(([^)]*)\)").unwrap());
static BRACE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)/([^{}]*)\{").unwrap());
static BRACE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)/([^{}]*)\}").unwrap());
static OMIT_SEMICOLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^omit_semicolon\b").unwrap());
static CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^cont[ \t](.*)$").unwrap());

/// A recognized marker event, in recognition priority order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Marker {
    /// `kind_begin(name)`
    Begin { kind: String, name: String },
    /// `kind_end(name)`
    End { kind: String, name: String },
    /// `kind/name{`; also lands on the open-brace stack.
    BraceOpen { kind: String, name: String },
    /// `kind/name}`; closes and leaves the stack.
    BraceClose { kind: String, name: String },
    /// `}`; closes whatever is on top of the open-brace stack.
    BareClose,
    /// `omit_semicolon`; one-shot suppression toggle.
    OmitSemicolon,
    /// `cont <text>`; splices `<text>` without a numbering slot.
    Continuation { text: String },
}

/// Recognize the marker on `line`, if any.
pub(crate) fn recognize(line: &str) -> Option<Marker> {
    let body = directive_body(line)?;

    if let Some(captures) = BEGIN.captures(body) {
        return Some(Marker::Begin {
            kind: captures[1].to_owned(),
            name: captures[2].to_owned(),
        });
    }
    if let Some(captures) = END.captures(body) {
        return Some(Marker::End {
            kind: captures[1].to_owned(),
            name: captures[2].to_owned(),
        });
    }
    if let Some(captures) = BRACE_OPEN.captures(body) {
        return Some(Marker::BraceOpen {
            kind: captures[1].to_owned(),
            name: captures[2].to_owned(),
        });
    }
    if let Some(captures) = BRACE_CLOSE.captures(body) {
        return Some(Marker::BraceClose {
            kind: captures[1].to_owned(),
            name: captures[2].to_owned(),
        });
    }
    if body.starts_with('}') {
        return Some(Marker::BareClose);
    }
    if OMIT_SEMICOLON.is_match(body) {
        return Some(Marker::OmitSemicolon);
    }
    if let Some(captures) = CONTINUATION.captures(body) {
        return Some(Marker::Continuation {
            text: captures[1].to_owned(),
        });
    }
    None
}

/// Text after the directive prefix: `#@` anchored at the line start,
/// or the first `#@@` anywhere in the line.
fn directive_body(line: &str) -> Option<&str> {
    if let Some(pos) = line.find("#@@") {
        return Some(&line[pos + 3..]);
    }
    line.strip_prefix("#@")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_end() {
        assert_eq!(
            recognize("#@range_begin(setup)"),
            Some(Marker::Begin {
                kind: "range".to_owned(),
                name: "setup".to_owned(),
            })
        );
        assert_eq!(
            recognize("#@range_end(setup)"),
            Some(Marker::End {
                kind: "range".to_owned(),
                name: "setup".to_owned(),
            })
        );
    }

    #[test]
    fn test_doubled_prefix_inside_comment() {
        assert_eq!(
            recognize("/* #@@range_begin(alloc) */"),
            Some(Marker::Begin {
                kind: "range".to_owned(),
                name: "alloc".to_owned(),
            })
        );
        assert_eq!(
            recognize("<!-- #@@} -->"),
            Some(Marker::BareClose)
        );
    }

    #[test]
    fn test_prefix_must_be_line_anchored() {
        // a single `#@` mid-line is not a marker
        assert_eq!(recognize("let s = \"#@range_begin(x)\";"), None);
    }

    #[test]
    fn test_brace_forms() {
        assert_eq!(
            recognize("#@range/init{"),
            Some(Marker::BraceOpen {
                kind: "range".to_owned(),
                name: "init".to_owned(),
            })
        );
        assert_eq!(
            recognize("#@range/init}"),
            Some(Marker::BraceClose {
                kind: "range".to_owned(),
                name: "init".to_owned(),
            })
        );
    }

    #[test]
    fn test_bare_close() {
        assert_eq!(recognize("#@}"), Some(Marker::BareClose));
    }

    #[test]
    fn test_omit_semicolon() {
        assert_eq!(recognize("#@omit_semicolon"), Some(Marker::OmitSemicolon));
        // a longer word is not the toggle
        assert_eq!(recognize("#@omit_semicolons"), None);
    }

    #[test]
    fn test_continuation_keeps_trailing_text() {
        assert_eq!(
            recognize("#@cont injected text"),
            Some(Marker::Continuation {
                text: "injected text".to_owned(),
            })
        );
        // no separator, no trailing text: not a continuation
        assert_eq!(recognize("#@cont"), None);
    }

    #[test]
    fn test_loose_names_are_captured_for_validation() {
        // structural match succeeds; the scanner rejects the name later
        assert_eq!(
            recognize("#@range_begin(two words)"),
            Some(Marker::Begin {
                kind: "range".to_owned(),
                name: "two words".to_owned(),
            })
        );
        assert_eq!(
            recognize("#@range/{"),
            Some(Marker::BraceOpen {
                kind: "range".to_owned(),
                name: String::new(),
            })
        );
    }

    #[test]
    fn test_ordinary_lines_are_not_markers() {
        assert_eq!(recognize("fn main() {"), None);
        assert_eq!(recognize(""), None);
        assert_eq!(recognize("# a comment"), None);
        assert_eq!(recognize("#@unknown_directive"), None);
    }
}
