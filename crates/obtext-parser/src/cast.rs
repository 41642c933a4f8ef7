//! Converting argument text into typed scalars.

use std::fmt;

use thiserror::Error;

use obtext_core::scalar::{Scalar, ScalarKind};

/// A text value that could not be converted to its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot cast `{value}` to {kind}: {reason}")]
pub struct CastError {
    pub value: String,
    pub kind: ScalarKind,
    pub reason: String,
}

impl CastError {
    pub fn new(value: impl Into<String>, kind: ScalarKind, reason: impl fmt::Display) -> Self {
        Self {
            value: value.into(),
            kind,
            reason: reason.to_string(),
        }
    }
}

/// Converts the text of an argument to a [`Scalar`] of the requested kind.
///
/// Implement this to support other number formats, e.g. hexadecimal
/// integers or numbers with digit separators.
pub trait Caster: fmt::Debug + Send + Sync {
    fn cast(&self, value: &str, kind: ScalarKind) -> Result<Scalar, CastError>;
}

/// Casts with the standard library parsers.
///
/// `int` is a signed 64-bit decimal, `float` a 64-bit float and `string`
/// the text unchanged. Surrounding whitespace is not accepted for numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCaster;

impl Caster for StandardCaster {
    fn cast(&self, value: &str, kind: ScalarKind) -> Result<Scalar, CastError> {
        match kind {
            ScalarKind::Int => value
                .parse::<i64>()
                .map(Scalar::Int)
                .map_err(|err| CastError::new(value, kind, err)),
            ScalarKind::Float => value
                .parse::<f64>()
                .map(Scalar::Float)
                .map_err(|err| CastError::new(value, kind, err)),
            ScalarKind::String => Ok(Scalar::String(value.to_string())),
        }
    }
}
