//! Error types for document processing.
//!
//! This module provides the main error type [`ObtextError`] which wraps the
//! failures of every stage, from reading input to rendering output.

use std::io;

use thiserror::Error;

use obtext_parser::ParseError;

use crate::markup::RenderError;

/// The main error type for obtext operations.
///
/// # Diagnostic Variants
///
/// `Parse` carries the source text next to the syntax diagnostics so their
/// spans can be shown as snippets. `Document` holds validation, binding and
/// catalogue diagnostics, which refer to objects rather than source offsets.
#[derive(Debug, Error)]
pub enum ObtextError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("{0}")]
    Document(#[from] ParseError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl ObtextError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// The pipeline diagnostics, if this error came from a pipeline stage.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse { err, .. } | Self::Document(err) => Some(err),
            Self::Io(_) | Self::Render(_) => None,
        }
    }
}
