//! The scan state machine.
//!
//! [`Parser`] consumes marked-up source text line by line and builds a
//! [`Descriptor`]. Recognition is delegated to [`crate::marker`]; this
//! module owns the bookkeeping: the content-line counter, the open
//! ranges, the brace stack, semicolon suppression and error
//! collection.
//!
//! Problems never abort the scan. Each one is recorded against its
//! input line and scanning continues, so a single pass over a file
//! surfaces every issue it has; any recorded problem turns the whole
//! scan into an [`Err`] once the input is exhausted.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::{Descriptor, RangeKey};
use crate::error::{ParseDiagnostic, ParseErrorKind, ParseFailure};
use crate::line::Line;
use crate::marker::{self, Marker};
use crate::util::detab;

static NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+$").unwrap());

/// Scanner configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseOptions {
    /// Column width for tab expansion; 0 leaves tabs untouched.
    pub tab_width: usize,
    /// Keep content exactly as written: no tab expansion, no
    /// trailing-whitespace strip.
    pub verbatim: bool,
    /// Allowed range kinds. Markers naming any other kind are
    /// structural errors.
    pub kinds: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tab_width: 8,
            verbatim: false,
            kinds: vec!["range".to_owned()],
        }
    }
}

/// Builds a [`Descriptor`] from marked-up source text.
///
/// The parser holds only configuration; all scan state is local to one
/// [`parse`](Self::parse) call, so one parser can be reused across
/// independent files, including from multiple threads.
#[derive(Clone, Debug, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// Create a parser with the given options.
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Scan `input` into a descriptor, or the full list of problems
    /// found in it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFailure`] carrying every diagnostic recorded
    /// during the pass; there is no partially valid result.
    pub fn parse(&self, input: &str) -> Result<Descriptor, ParseFailure> {
        let mut scan = Scan::new(&self.options);
        for raw in input.lines() {
            scan.step(raw);
        }
        scan.finish()
    }
}

/// State for one scan invocation.
struct Scan<'a> {
    options: &'a ParseOptions,
    whole: Vec<Line>,
    ranges: HashMap<String, HashMap<String, Vec<Line>>>,
    /// Open keys, each with the physical line of its opening marker.
    open: HashMap<RangeKey, u32>,
    /// Brace-opened keys, innermost last, resolved by bare closers.
    brace_stack: Vec<RangeKey>,
    suppress_semicolons: bool,
    /// Number the next content line will take.
    next_number: u32,
    /// Physical input line, 1-based; directive lines count here but
    /// never consume a content number.
    location: u32,
    errors: Vec<ParseDiagnostic>,
}

impl<'a> Scan<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            whole: Vec::new(),
            ranges: HashMap::new(),
            open: HashMap::new(),
            brace_stack: Vec::new(),
            suppress_semicolons: false,
            next_number: 1,
            location: 0,
            errors: Vec::new(),
        }
    }

    fn step(&mut self, raw: &str) {
        self.location += 1;
        match marker::recognize(raw) {
            Some(Marker::Begin { kind, name }) => self.begin(kind, name, false),
            Some(Marker::End { kind, name }) => self.end(kind, name, false),
            Some(Marker::BraceOpen { kind, name }) => self.begin(kind, name, true),
            Some(Marker::BraceClose { kind, name }) => self.end(kind, name, true),
            Some(Marker::BareClose) => self.bare_close(),
            Some(Marker::OmitSemicolon) => self.suppress_semicolons = true,
            Some(Marker::Continuation { text }) => self.continuation(&text),
            None => self.content(raw),
        }
    }

    fn finish(mut self) -> Result<Descriptor, ParseFailure> {
        let mut unclosed: Vec<(RangeKey, u32)> = self.open.drain().collect();
        unclosed.sort_by_key(|&(_, opened_at)| opened_at);
        for (key, opened_at) in unclosed {
            self.record(ParseErrorKind::UnclosedAtEof { key, opened_at });
        }

        if self.errors.is_empty() {
            Ok(Descriptor::new(self.whole, self.ranges))
        } else {
            Err(ParseFailure {
                errors: self.errors,
            })
        }
    }

    /// Validate a raw (kind, name) pair against the allow-list and the
    /// name shape, recording the failure if any.
    fn checked_key(&mut self, kind: String, name: String) -> Option<RangeKey> {
        if !self.options.kinds.contains(&kind) {
            self.record(ParseErrorKind::WrongType { kind });
            return None;
        }
        if !NAME.is_match(&name) {
            self.record(ParseErrorKind::WrongName { name });
            return None;
        }
        Some(RangeKey { kind, name })
    }

    fn begin(&mut self, kind: String, name: String, braced: bool) {
        let Some(key) = self.checked_key(kind, name) else {
            return;
        };
        if self.open.contains_key(&key) {
            // the running accumulator is left untouched
            self.record(ParseErrorKind::DuplicateBegin { key });
            return;
        }
        self.ranges
            .entry(key.kind.clone())
            .or_default()
            .insert(key.name.clone(), Vec::new());
        self.open.insert(key.clone(), self.location);
        if braced {
            self.brace_stack.push(key);
        }
    }

    fn end(&mut self, kind: String, name: String, braced: bool) {
        let Some(key) = self.checked_key(kind, name) else {
            return;
        };
        if self.open.remove(&key).is_none() {
            self.record(ParseErrorKind::UnmatchedEnd { key });
            return;
        }
        if braced
            && let Some(pos) = self.brace_stack.iter().rposition(|open| *open == key)
        {
            self.brace_stack.remove(pos);
        }
    }

    fn bare_close(&mut self) {
        match self.brace_stack.pop() {
            Some(key) => {
                if self.open.remove(&key).is_none() {
                    self.record(ParseErrorKind::UnmatchedEnd { key });
                }
            }
            None => self.record(ParseErrorKind::UnmatchedBareClose),
        }
    }

    fn continuation(&mut self, text: &str) {
        let line = Line::injected(self.canonicalize(text));
        self.append(line);
    }

    fn content(&mut self, raw: &str) {
        if self.suppress_semicolons && raw.trim() == ";" {
            return;
        }
        let line = Line::new(self.next_number, self.canonicalize(raw));
        self.next_number += 1;
        self.append(line);
    }

    /// Append to the whole-file list and every open range.
    fn append(&mut self, line: Line) {
        for key in self.open.keys() {
            if let Some(lines) = self
                .ranges
                .get_mut(&key.kind)
                .and_then(|ranges| ranges.get_mut(&key.name))
            {
                lines.push(line.clone());
            }
        }
        self.whole.push(line);
    }

    fn canonicalize(&self, text: &str) -> String {
        if self.options.verbatim {
            return text.to_owned();
        }
        let expanded = detab(text, self.options.tab_width);
        expanded.trim_end().to_owned()
    }

    fn record(&mut self, kind: ParseErrorKind) {
        let diagnostic = ParseDiagnostic {
            line: self.location,
            kind,
        };
        tracing::error!(line = diagnostic.line, "{}", diagnostic.kind);
        self.errors.push(diagnostic);
    }
}
