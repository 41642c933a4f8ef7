//! Error codes for the obtext diagnostic system.
//!
//! Error codes are organized by stage:
//! - `E0xx` - Syntax errors (parsing)
//! - `E1xx` - Validation errors
//! - `E2xx` - Binding and catalogue errors

use std::fmt;

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input, or unconsumed input after the root object.
    Syntax,
    /// An object whose name has no rule or prototype.
    UnknownObject,
    /// An argument count or argument shape contract was violated.
    Arity,
    /// A text argument could not be converted to its declared scalar kind.
    Cast,
    /// A resource limit such as the nesting depth was exceeded.
    Limit,
    /// The catalogue itself is invalid.
    Catalogue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::UnknownObject => "unknown object",
            ErrorKind::Arity => "arity error",
            ErrorKind::Cast => "cast error",
            ErrorKind::Limit => "limit exceeded",
            ErrorKind::Catalogue => "catalogue error",
        };
        f.write_str(name)
    }
}

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// Invalid syntax.
    ///
    /// The input does not start with an object (`@name`).
    E001,

    /// Missing object name.
    ///
    /// An `@` was not followed by a name made of letters, digits and
    /// underscores. Use `\@` for a literal at sign.
    E002,

    /// Unterminated argument.
    ///
    /// The input ended before the `}` closing an argument.
    E003,

    /// Remaining characters.
    ///
    /// The root object was parsed but input remains after it. A document is
    /// exactly one object.
    E004,

    /// Invalid UTF-8.
    ///
    /// The input bytes are not valid UTF-8.
    E005,

    /// Nesting too deep.
    ///
    /// Objects are nested deeper than the configured maximum depth.
    E006,

    // =========================================================================
    // Validation Errors (E1xx)
    // =========================================================================
    /// Undefined object.
    ///
    /// No validation rule exists for this object name.
    E100,

    /// Invalid argument count.
    ///
    /// The object has more or fewer arguments than its rule allows.
    E101,

    /// Argument cannot be cast.
    ///
    /// An argument declared with a scalar kind does not consist of exactly
    /// one text element.
    E102,

    /// Invalid scalar value.
    ///
    /// The text of an argument could not be converted to its declared kind.
    E103,

    // =========================================================================
    // Binding Errors (E2xx)
    // =========================================================================
    /// Undefined object.
    ///
    /// The catalogue has no prototype for this object name.
    E200,

    /// Argument contract violated.
    ///
    /// The arguments do not match the shape the prototype requires.
    E201,

    /// Duplicate tag.
    ///
    /// Two prototypes in a catalogue share the same tag.
    E202,

    /// Reserved tag.
    ///
    /// A prototype uses the empty tag, which is reserved for text and
    /// content block nodes.
    E203,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Syntax errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E006 => "E006",
            // Validation errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            // Binding errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Syntax errors
            ErrorCode::E001 => "invalid syntax",
            ErrorCode::E002 => "missing object name",
            ErrorCode::E003 => "unterminated argument",
            ErrorCode::E004 => "remaining characters",
            ErrorCode::E005 => "invalid utf-8",
            ErrorCode::E006 => "nesting too deep",
            // Validation errors
            ErrorCode::E100 => "object not defined",
            ErrorCode::E101 => "invalid argument count",
            ErrorCode::E102 => "argument cannot be cast",
            ErrorCode::E103 => "invalid scalar value",
            // Binding errors
            ErrorCode::E200 => "object not defined",
            ErrorCode::E201 => "argument contract violated",
            ErrorCode::E202 => "duplicate tag",
            ErrorCode::E203 => "reserved tag",
        }
    }

    /// Returns the failure class this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E001
            | ErrorCode::E002
            | ErrorCode::E003
            | ErrorCode::E004
            | ErrorCode::E005 => ErrorKind::Syntax,
            ErrorCode::E006 => ErrorKind::Limit,
            ErrorCode::E100 | ErrorCode::E200 => ErrorKind::UnknownObject,
            ErrorCode::E101 | ErrorCode::E201 => ErrorKind::Arity,
            ErrorCode::E102 | ErrorCode::E103 => ErrorKind::Cast,
            ErrorCode::E202 | ErrorCode::E203 => ErrorKind::Catalogue,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E203.to_string(), "E203");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E004.description(), "remaining characters");
        assert_eq!(ErrorCode::E100.description(), "object not defined");
        assert_eq!(ErrorCode::E200.description(), "object not defined");
    }

    #[test]
    fn test_error_code_kind() {
        assert_eq!(ErrorCode::E001.kind(), ErrorKind::Syntax);
        assert_eq!(ErrorCode::E004.kind(), ErrorKind::Syntax);
        assert_eq!(ErrorCode::E006.kind(), ErrorKind::Limit);
        assert_eq!(ErrorCode::E100.kind(), ErrorKind::UnknownObject);
        assert_eq!(ErrorCode::E200.kind(), ErrorKind::UnknownObject);
        assert_eq!(ErrorCode::E101.kind(), ErrorKind::Arity);
        assert_eq!(ErrorCode::E201.kind(), ErrorKind::Arity);
        assert_eq!(ErrorCode::E103.kind(), ErrorKind::Cast);
        assert_eq!(ErrorCode::E202.kind(), ErrorKind::Catalogue);
    }
}
