//! # Obtext Parser
//!
//! Parsing, validation and semantic binding for objective text, a markup
//! notation made of nested objects:
//!
//! ```text
//! @section{Intro}{
//!     @para{Some @bold{bold} text and a literal \@ sign.}
//! }
//! ```
//!
//! The pipeline has three independent stages:
//!
//! 1. **Parse** - [`parse`] turns bytes into an untyped
//!    [`Object`](obtext_core::syntax::Object) tree, normalizing whitespace
//!    and resolving escapes.
//! 2. **Validate** - [`validate::validate`] checks every object against a
//!    table of [`Rules`](constraint::Rules) and records cast values.
//! 3. **Bind** - [`bind::bind`] resolves every object through a
//!    [`Catalogue`](bind::Catalogue) of typed prototypes, producing a
//!    semantic tree.
//!
//! Each stage either succeeds completely or fails with a [`ParseError`]
//! describing the first problem; no partial tree is ever returned.
//!
//! ## Usage
//!
//! ```
//! # use obtext_parser::{Limits, ParseError, parse_str};
//! # use obtext_parser::constraint::{ArgCount, Rules};
//! # use obtext_parser::validate::validate;
//!
//! fn main() -> Result<(), ParseError> {
//!     let limits = Limits::default();
//!     let mut tree = parse_str("@p{Hello, @b{world}!}", &limits)?;
//!
//!     let rules = Rules::new()
//!         .with("p", ArgCount::Exactly(1))
//!         .with("b", ArgCount::Exactly(1));
//!     validate(&mut tree, &rules, &limits)?;
//!
//!     assert_eq!(tree.name(), "p");
//!     Ok(())
//! }
//! ```

pub mod bind;
pub mod cast;
pub mod constraint;
pub mod error;
mod limits;
mod normalize;
mod parser;
mod parser_types;
mod span;
pub mod validate;

use std::io::Read;

use log::debug;

use obtext_core::syntax::Object;

pub use error::ParseError;
pub use limits::{DEFAULT_MAX_DEPTH, Limits};
pub use span::Span;

use error::{Diagnostic, ErrorCode};

/// Parse a buffer of objective text into a syntax tree.
///
/// The input must be valid UTF-8. Leading and trailing whitespace is
/// ignored; the rest must be exactly one object.
///
/// # Errors
///
/// Returns a [`ParseError`] with one syntax diagnostic whose span points
/// into `source`.
pub fn parse(source: &[u8], limits: &Limits) -> Result<Object, ParseError> {
    let source = std::str::from_utf8(source).map_err(|err| {
        let start = err.valid_up_to();
        let end = start + err.error_len().unwrap_or(source.len() - start);
        Diagnostic::error("input is not valid UTF-8")
            .with_code(ErrorCode::E005)
            .with_label(Span::new(start..end), "invalid byte sequence")
    })?;
    parse_str(source, limits)
}

/// Parse a string of objective text into a syntax tree.
///
/// # Example
///
/// ```
/// # use obtext_parser::{Limits, parse_str};
/// let tree = parse_str(r"@p{ a\@b }", &Limits::default()).unwrap();
/// assert_eq!(tree.args()[0].single_text(), Some("a@b"));
/// ```
pub fn parse_str(source: &str, limits: &Limits) -> Result<Object, ParseError> {
    let raw = parser::build_document(source, limits)?;
    let object = normalize::normalize(raw)?;
    debug!(root = object.name(), bytes = source.len(); "Parsed document");
    Ok(object)
}

/// Read `reader` to the end, then parse it.
///
/// # Errors
///
/// Read failures are returned as [`std::io::Error`]; syntax errors are
/// wrapped in an [`std::io::Error`] of kind
/// [`InvalidData`](std::io::ErrorKind::InvalidData) carrying the
/// [`ParseError`].
pub fn parse_reader(mut reader: impl Read, limits: &Limits) -> std::io::Result<Object> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    parse(&buffer, limits).map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}
