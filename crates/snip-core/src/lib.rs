//! Excerpt extraction core.
//!
//! Scans program source for inline range markers and builds a
//! [`Descriptor`]: the whole file as numbered [`Line`]s plus every
//! named range found in it. Hosts include the extracted ranges in
//! documentation while the recorded numbers keep cross-references and
//! diagnostics pointing at the right place.
//!
//! # Markers
//!
//! Markers sit behind `#@` at the start of a line, or behind `#@@`
//! anywhere (so they can hide inside the host language's comments):
//!
//! - `#@range_begin(name)` … `#@range_end(name)`: a named range
//! - `#@range/name{` … `#@}`: brace form; the bare closer resolves
//!   the innermost open brace range without repeating its name
//! - `#@omit_semicolon`: from here on, drop lines that are a single
//!   semicolon
//! - `#@cont text`: splice `text` in without taking a line number
//!
//! The scan collects every problem it finds and fails at the end of
//! the pass, so one run reports all of a file's issues.
//!
//! # Example
//!
//! ```
//! use snip_core::{ParseOptions, Parser};
//!
//! let source = "fn main() {\n#@range_begin(body)\n    greet();\n#@range_end(body)\n}\n";
//! let descriptor = Parser::new(ParseOptions::default()).parse(source).unwrap();
//!
//! assert_eq!(descriptor.whole_file().len(), 3);
//! let body = descriptor.lines("range", "body").unwrap();
//! assert_eq!(body[0].text, "    greet();");
//! assert_eq!(body[0].number, Some(2));
//! ```

mod descriptor;
mod directive;
mod error;
mod line;
mod marker;
mod parser;
mod util;

pub use descriptor::{Descriptor, RangeKey};
pub use directive::Directive;
pub use error::{ParseDiagnostic, ParseErrorKind, ParseFailure};
pub use line::Line;
pub use parser::{ParseOptions, Parser};
pub use util::detab;
