//! The ParseError type returned by every pipeline stage.

use std::fmt;

use crate::error::{Diagnostic, ErrorKind};

/// Error type for parsing, validation, binding and catalogue construction.
///
/// Wraps one or more diagnostics. The pipeline stages stop at the first
/// failure and produce exactly one; catalogue construction may produce
/// several.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The first diagnostic, which for the pipeline stages is the only one.
    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }

    /// The failure class of the first diagnostic.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.first().and_then(Diagnostic::kind)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_error_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::E103);
        let err: ParseError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.kind(), Some(ErrorKind::Cast));
    }

    #[test]
    fn test_parse_error_display_single() {
        let err: ParseError = Diagnostic::error("nesting too deep").into();

        assert_eq!(err.to_string(), "error: nesting too deep");
    }

    #[test]
    fn test_parse_error_display_multiple() {
        let err = ParseError::new(vec![
            Diagnostic::error("duplicate tag `p`"),
            Diagnostic::error("duplicate tag `b`"),
        ]);

        assert_eq!(err.to_string(), "error: duplicate tag `p` (+1 more)");
        assert!(err.kind().is_none());
    }
}
