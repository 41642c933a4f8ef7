//! Error and diagnostic system for the obtext pipeline.
//!
//! This module provides an error handling system with:
//! - Error codes grouped by pipeline stage
//! - An [`ErrorKind`] for each code, so callers can tell a syntax error from
//!   an unknown object, an arity violation or a failed cast
//! - Labeled byte spans into the input for syntax errors
//! - A diagnostic collector for reporting several catalogue problems at once
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error message with an error code, optional source locations, and
//! help text. Every stage returns [`ParseError`], which wraps the diagnostics.
//! Parsing, validation and binding stop at the first error, so their
//! [`ParseError`] always holds exactly one diagnostic.
//!
//! # Example
//!
//! ```
//! # use obtext_parser::error::{Diagnostic, ErrorCode, ErrorKind};
//! # use obtext_parser::Span;
//!
//! let diag = Diagnostic::error("remaining characters after the document")
//!     .with_code(ErrorCode::E004)
//!     .with_label(Span::new(5..12), "unexpected input")
//!     .with_help("a document is exactly one root object");
//!
//! assert_eq!(diag.kind(), Some(ErrorKind::Syntax));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCode, ErrorKind};
pub use label::Label;
pub use parse_error::ParseError;
