//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a byte range of the input.
///
/// ```text
/// error[E004]: remaining characters after the root object
///  --> doc.obt:1:7
///   |
/// 1 | @p{x}garbage
///   |      ^^^^^^^ not part of the document
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    /// Create a new label.
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
