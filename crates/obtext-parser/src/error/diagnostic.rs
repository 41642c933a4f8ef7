//! The core diagnostic type for obtext errors.
//!
//! A [`Diagnostic`] represents a single failure with an optional error code,
//! labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{
        error_code::{ErrorCode, ErrorKind},
        label::Label,
    },
    span::Span,
};

/// A diagnostic message with optional source location information.
///
/// Syntax diagnostics carry a label pointing at the offending bytes of the
/// input. Validation and binding operate on trees without positions, so
/// their diagnostics name the object instead:
///
/// ```text
/// error[E201]: object `@img`: expected exactly 2 arguments, found 1
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use obtext_parser::error::{Diagnostic, ErrorCode};
    /// # use obtext_parser::Span;
    ///
    /// let diag = Diagnostic::error("missing object name after `@`")
    ///     .with_code(ErrorCode::E002)
    ///     .with_label(Span::new(3..4), "expected a name")
    ///     .with_help("use `\\@` for a literal at sign");
    ///
    /// assert_eq!(diag.to_string(), "error[E002]: missing object name after `@`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the failure class, derived from the error code.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.code.map(|code| code.kind())
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach a labeled span to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        f.write_str("error")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
