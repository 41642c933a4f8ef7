//! Typed scalar values that text arguments can be cast to.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// The kind of scalar a text argument is cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// A signed 64-bit integer.
    Int,
    /// A 64-bit float.
    Float,
    /// The text itself.
    String,
}

impl ScalarKind {
    /// Returns the kind name as used in rule definitions.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::String => "string",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a scalar kind name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scalar kind `{0}`, expected one of: int, float, string")]
pub struct UnknownScalarKind(pub String);

impl FromStr for ScalarKind {
    type Err = UnknownScalarKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(ScalarKind::Int),
            "float" => Ok(ScalarKind::Float),
            "string" => Ok(ScalarKind::String),
            other => Err(UnknownScalarKind(other.to_string())),
        }
    }
}

/// A typed value produced by casting a text argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// The kind of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::String(_) => ScalarKind::String,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::String(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_kind_from_str() {
        assert_eq!("int".parse::<ScalarKind>(), Ok(ScalarKind::Int));
        assert_eq!("float".parse::<ScalarKind>(), Ok(ScalarKind::Float));
        assert_eq!("string".parse::<ScalarKind>(), Ok(ScalarKind::String));
        assert!("Int".parse::<ScalarKind>().is_err());
    }

    #[test]
    fn test_scalar_kind_display_matches_from_str() {
        for kind in [ScalarKind::Int, ScalarKind::Float, ScalarKind::String] {
            assert_eq!(kind.to_string().parse::<ScalarKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Scalar::Int(3).as_int(), Some(3));
        assert_eq!(Scalar::Int(3).as_str(), None);
        assert_eq!(Scalar::Float(1.5).as_float(), Some(1.5));
        assert_eq!(Scalar::String("x".into()).as_str(), Some("x"));
        assert_eq!(Scalar::String("x".into()).kind(), ScalarKind::String);
    }
}
