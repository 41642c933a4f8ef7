//! Argument constraints and the rule table used by the validator.
//!
//! A rule is attached to an object name and checks the arguments of every
//! object with that name. [`ArgCount`] only checks how many arguments there
//! are. [`CastArgs`] also converts text arguments to typed scalars, which the
//! validator records on the arguments once the whole tree has passed.
//!
//! ```
//! # use obtext_parser::constraint::{ArgCount, CastArgs, Rules};
//! # use obtext_core::scalar::ScalarKind;
//! let rules = Rules::new()
//!     .with("p", ArgCount::Exactly(1))
//!     .with("doc", ArgCount::Any)
//!     .with("image", CastArgs::new([None, Some(ScalarKind::String)]));
//!
//! assert!(rules.get("p").is_some());
//! assert!(rules.get("h2").is_none());
//! ```

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use thiserror::Error;

use obtext_core::{
    scalar::{Scalar, ScalarKind},
    syntax::Arg,
};

use crate::cast::{CastError, Caster, StandardCaster};

/// Per-argument cast results, in argument order.
///
/// May be shorter than the argument list; missing entries mean "not cast".
pub type Casts = Vec<Option<Scalar>>;

/// Why a constraint rejected the arguments of an object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("expected {expected}, found {found}")]
    ArgCount { expected: ArgCount, found: usize },

    #[error("argument {} must be a single text to cast to {kind}", .index + 1)]
    NotCastable { index: usize, kind: ScalarKind },

    #[error("argument {}: {source}", .index + 1)]
    Cast {
        index: usize,
        #[source]
        source: CastError,
    },

    /// Rejected by a custom constraint.
    #[error("{0}")]
    Other(String),
}

/// A check run against the arguments of one object.
pub trait ArgConstraint: fmt::Debug + Send + Sync {
    /// Check `args`, returning the scalars to record on them.
    ///
    /// Must not depend on anything but `args`; the validator may call
    /// constraints in any order.
    fn check(&self, args: &[Arg]) -> Result<Casts, ConstraintError>;
}

/// How many arguments an object accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgCount {
    /// Any number, including none.
    #[default]
    Any,
    /// No arguments at all.
    None,
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
}

impl ArgCount {
    /// Whether `count` arguments are acceptable.
    pub fn allows(&self, count: usize) -> bool {
        match *self {
            ArgCount::Any => true,
            ArgCount::None => count == 0,
            ArgCount::Exactly(n) => count == n,
            ArgCount::AtLeast(n) => count >= n,
            ArgCount::AtMost(n) => count <= n,
        }
    }

    fn require(&self, count: usize) -> Result<(), ConstraintError> {
        if self.allows(count) {
            Ok(())
        } else {
            Err(ConstraintError::ArgCount {
                expected: *self,
                found: count,
            })
        }
    }
}

impl fmt::Display for ArgCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgCount::Any => write!(f, "any number of arguments"),
            ArgCount::None => write!(f, "no arguments"),
            ArgCount::Exactly(n) => write!(f, "exactly {n} arguments"),
            ArgCount::AtLeast(n) => write!(f, "at least {n} arguments"),
            ArgCount::AtMost(n) => write!(f, "at most {n} arguments"),
        }
    }
}

impl ArgConstraint for ArgCount {
    fn check(&self, args: &[Arg]) -> Result<Casts, ConstraintError> {
        self.require(args.len())?;
        Ok(Casts::new())
    }
}

/// Checks the argument count and casts selected arguments to scalars.
///
/// `kinds[i]` names the kind argument `i` is cast to, or `None` to leave it
/// alone. Each cast argument must consist of exactly one text element.
#[derive(Debug, Clone)]
pub struct CastArgs {
    count: ArgCount,
    kinds: Vec<Option<ScalarKind>>,
    caster: Arc<dyn Caster>,
}

impl CastArgs {
    /// Require exactly as many arguments as there are kinds.
    pub fn new(kinds: impl IntoIterator<Item = Option<ScalarKind>>) -> Self {
        let kinds: Vec<_> = kinds.into_iter().collect();
        Self {
            count: ArgCount::Exactly(kinds.len()),
            kinds,
            caster: Arc::new(StandardCaster),
        }
    }

    /// Accept extra arguments after the declared ones. They are not cast.
    pub fn allow_extra(mut self) -> Self {
        self.count = ArgCount::AtLeast(self.kinds.len());
        self
    }

    /// Replace the count check. Kinds past the actual arguments are skipped.
    pub fn with_count(mut self, count: ArgCount) -> Self {
        self.count = count;
        self
    }

    pub fn with_caster(mut self, caster: impl Caster + 'static) -> Self {
        self.caster = Arc::new(caster);
        self
    }

    pub fn kinds(&self) -> &[Option<ScalarKind>] {
        &self.kinds
    }
}

impl ArgConstraint for CastArgs {
    fn check(&self, args: &[Arg]) -> Result<Casts, ConstraintError> {
        self.count.require(args.len())?;

        args.iter()
            .zip(&self.kinds)
            .enumerate()
            .map(|(index, (arg, kind))| {
                let Some(kind) = *kind else {
                    return Ok(None);
                };
                let text = arg
                    .single_text()
                    .ok_or(ConstraintError::NotCastable { index, kind })?;
                self.caster
                    .cast(text, kind)
                    .map(Some)
                    .map_err(|source| ConstraintError::Cast { index, source })
            })
            .collect()
    }
}

/// Object names mapped to the constraint their arguments must satisfy.
///
/// Names keep their insertion order, so listing the rules is deterministic.
#[derive(Debug, Default)]
pub struct Rules {
    rules: IndexMap<String, Box<dyn ArgConstraint>>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Rules::insert`].
    pub fn with(mut self, name: impl Into<String>, constraint: impl ArgConstraint + 'static) -> Self {
        self.insert(name, constraint);
        self
    }

    /// Add or replace the rule for `name`, returning the replaced rule.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        constraint: impl ArgConstraint + 'static,
    ) -> Option<Box<dyn ArgConstraint>> {
        self.rules.insert(name.into(), Box::new(constraint))
    }

    pub fn get(&self, name: &str) -> Option<&dyn ArgConstraint> {
        self.rules.get(name).map(|rule| &**rule)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<(String, Box<dyn ArgConstraint>)> for Rules {
    fn from_iter<T: IntoIterator<Item = (String, Box<dyn ArgConstraint>)>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obtext_core::syntax::{Element, Object, Text};

    fn text_arg(value: &str) -> Arg {
        Arg::new(vec![Element::Text(Text::new(value))])
    }

    #[test]
    fn test_arg_count_allows() {
        assert!(ArgCount::Any.allows(0));
        assert!(ArgCount::Any.allows(9));
        assert!(ArgCount::None.allows(0));
        assert!(!ArgCount::None.allows(1));
        assert!(ArgCount::Exactly(2).allows(2));
        assert!(!ArgCount::Exactly(2).allows(1));
        assert!(ArgCount::AtLeast(1).allows(3));
        assert!(!ArgCount::AtLeast(1).allows(0));
        assert!(ArgCount::AtMost(1).allows(0));
        assert!(!ArgCount::AtMost(1).allows(2));
    }

    #[test]
    fn test_arg_count_error_message() {
        let err = ArgCount::Exactly(2).check(&[text_arg("x")]).unwrap_err();
        assert_eq!(err.to_string(), "expected exactly 2 arguments, found 1");
    }

    #[test]
    fn test_cast_args_casts_declared_kinds() {
        let rule = CastArgs::new([None, Some(ScalarKind::String)]);
        let casts = rule
            .check(&[text_arg("alt"), text_arg("http://x")])
            .expect("valid arguments");

        assert_eq!(casts, vec![None, Some(Scalar::String("http://x".to_string()))]);
    }

    #[test]
    fn test_cast_args_checks_count_first() {
        let rule = CastArgs::new([Some(ScalarKind::Int)]);
        let err = rule.check(&[]).unwrap_err();
        assert!(matches!(err, ConstraintError::ArgCount { found: 0, .. }));
    }

    #[test]
    fn test_cast_args_requires_single_text() {
        let rule = CastArgs::new([Some(ScalarKind::Int)]);

        let err = rule.check(&[Arg::default()]).unwrap_err();
        assert_eq!(
            err,
            ConstraintError::NotCastable {
                index: 0,
                kind: ScalarKind::Int
            }
        );

        let nested = Arg::new(vec![Element::Object(Object::new("b", vec![]).expect("valid object name"))]);
        assert!(rule.check(&[nested]).is_err());
    }

    #[test]
    fn test_cast_args_reports_cast_failure() {
        let rule = CastArgs::new([Some(ScalarKind::Int)]);
        let err = rule.check(&[text_arg("ten")]).unwrap_err();

        assert!(matches!(err, ConstraintError::Cast { index: 0, .. }));
        assert!(err.to_string().starts_with("argument 1: cannot cast `ten` to int"));
    }

    #[test]
    fn test_cast_args_allow_extra() {
        let rule = CastArgs::new([Some(ScalarKind::Int)]).allow_extra();
        let casts = rule
            .check(&[text_arg("1"), text_arg("not cast")])
            .expect("extra arguments are allowed");

        assert_eq!(casts, vec![Some(Scalar::Int(1))]);
    }

    #[test]
    fn test_cast_args_skips_kinds_past_the_arguments() {
        let rule = CastArgs::new([Some(ScalarKind::Int), Some(ScalarKind::Int)])
            .with_count(ArgCount::AtMost(2));
        let casts = rule.check(&[text_arg("3")]).expect("one argument is allowed");

        assert_eq!(casts, vec![Some(Scalar::Int(3))]);
    }

    #[test]
    fn test_rules_replace_and_order() {
        let mut rules = Rules::new().with("b", ArgCount::Any).with("a", ArgCount::None);
        assert!(rules.insert("b", ArgCount::Exactly(1)).is_some());

        assert_eq!(rules.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(rules.len(), 2);
    }
}
