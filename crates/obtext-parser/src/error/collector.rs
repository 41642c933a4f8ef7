//! Collector for accumulating diagnostics.
//!
//! Parsing, validation and binding stop at the first failure. Catalogue
//! construction is different: every conflicting prototype is reported at
//! once, so a misconfigured catalogue can be fixed in one pass.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics and turns them into a single result.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// Returns `Err(ParseError)` holding every emitted diagnostic, or `Ok(())`
    /// if nothing was emitted.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(ParseError::new(self.diagnostics))
        }
    }
}
