//! Validation of a syntax tree against a table of [`Rules`].
//!
//! Every object in the tree must have a rule, and its arguments must satisfy
//! that rule. Text is always valid. Validation never changes the shape of the
//! tree; it only records the scalars produced by casting rules on the
//! arguments they were cast from.
//!
//! Validation runs in two phases. The first walks the tree read-only, runs
//! every rule and collects the casts. The second writes the casts back and
//! only happens when the first found no error, so a rejected tree is left
//! exactly as it was.

use log::debug;

use obtext_core::syntax::{Element, Object};

use crate::{
    constraint::{Casts, ConstraintError, Rules},
    error::{Diagnostic, ErrorCode, ParseError},
    limits::Limits,
};

/// The order in which objects are checked.
///
/// The verdict does not depend on the order, only which error is reported
/// when a tree has several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitOrder {
    /// Check an object after everything nested inside it.
    #[default]
    ChildrenFirst,
    /// Check an object before anything nested inside it.
    ParentFirst,
}

/// Validates syntax trees against a rule table.
///
/// # Example
///
/// ```
/// # use obtext_parser::{Limits, parse_str};
/// # use obtext_parser::constraint::{ArgCount, Rules};
/// # use obtext_parser::validate::Validator;
/// let rules = Rules::new().with("h1", ArgCount::Exactly(1));
/// let mut tree = parse_str("@h2{x}", &Limits::default()).unwrap();
///
/// let err = Validator::new(&rules).validate(&mut tree).unwrap_err();
/// assert_eq!(err.to_string(), "error[E100]: object `@h2` not defined");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    rules: &'r Rules,
    limits: Limits,
    order: VisitOrder,
}

impl<'r> Validator<'r> {
    pub fn new(rules: &'r Rules) -> Self {
        Self {
            rules,
            limits: Limits::default(),
            order: VisitOrder::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_order(mut self, order: VisitOrder) -> Self {
        self.order = order;
        self
    }

    /// Validate `root` and record cast values on its arguments.
    ///
    /// Stops at the first error. On error `root` is not modified.
    pub fn validate(&self, root: &mut Object) -> Result<(), ParseError> {
        let mut casts = Vec::new();
        self.check(root, 1, &mut casts)?;

        let objects = casts.len();
        let mut casts = casts.into_iter();
        self.apply(root, &mut casts);

        debug!(objects, order:? = self.order; "Validated syntax tree");
        Ok(())
    }

    /// Phase one: check `object` and its descendants, pushing one entry of
    /// casts per object in visit order.
    fn check(&self, object: &Object, depth: usize, casts: &mut Vec<Casts>) -> Result<(), Diagnostic> {
        if self.limits.exceeds(depth) {
            return Err(depth_error(object, &self.limits));
        }

        match self.order {
            VisitOrder::ParentFirst => {
                casts.push(self.check_own(object)?);
                self.check_children(object, depth, casts)
            }
            VisitOrder::ChildrenFirst => {
                self.check_children(object, depth, casts)?;
                casts.push(self.check_own(object)?);
                Ok(())
            }
        }
    }

    fn check_children(
        &self,
        object: &Object,
        depth: usize,
        casts: &mut Vec<Casts>,
    ) -> Result<(), Diagnostic> {
        for arg in object.args() {
            for element in arg.elements() {
                if let Element::Object(child) = element {
                    self.check(child, depth + 1, casts)?;
                }
            }
        }
        Ok(())
    }

    /// Run the rule for `object` itself.
    fn check_own(&self, object: &Object) -> Result<Casts, Diagnostic> {
        let name = object.name();
        let Some(rule) = self.rules.get(name) else {
            return Err(Diagnostic::error(format!("object `@{name}` not defined"))
                .with_code(ErrorCode::E100)
                .with_help(format!("add a validation rule for `{name}`")));
        };

        rule.check(object.args()).map_err(|err| {
            let code = match err {
                ConstraintError::ArgCount { .. } | ConstraintError::Other(_) => ErrorCode::E101,
                ConstraintError::NotCastable { .. } => ErrorCode::E102,
                ConstraintError::Cast { .. } => ErrorCode::E103,
            };
            Diagnostic::error(format!("object `@{name}`: {err}")).with_code(code)
        })
    }

    /// Phase two: record casts, consuming them in the same order `check`
    /// produced them.
    fn apply(&self, object: &mut Object, casts: &mut impl Iterator<Item = Casts>) {
        match self.order {
            VisitOrder::ParentFirst => {
                record(object, casts.next());
                self.apply_children(object, casts);
            }
            VisitOrder::ChildrenFirst => {
                self.apply_children(object, casts);
                record(object, casts.next());
            }
        }
    }

    fn apply_children(&self, object: &mut Object, casts: &mut impl Iterator<Item = Casts>) {
        for arg in object.args_mut() {
            for child in arg.objects_mut() {
                self.apply(child, casts);
            }
        }
    }
}

/// Overwrite every argument's cast value, clearing those the rule did not
/// cast so nothing survives from an earlier validation.
fn record(object: &mut Object, casts: Option<Casts>) {
    let mut casts = casts.into_iter().flatten();
    for arg in object.args_mut() {
        arg.set_cast_value(casts.next().flatten());
    }
}

pub(crate) fn depth_error(object: &Object, limits: &Limits) -> Diagnostic {
    Diagnostic::error(format!(
        "object `@{}` is nested deeper than {} levels",
        object.name(),
        limits.max_depth()
    ))
    .with_code(ErrorCode::E006)
}

/// Validate `root` against `rules`, visiting children before their parent.
pub fn validate(root: &mut Object, rules: &Rules, limits: &Limits) -> Result<(), ParseError> {
    Validator::new(rules).with_limits(*limits).validate(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constraint::{ArgCount, CastArgs},
        error::ErrorKind,
        parse_str,
    };
    use obtext_core::scalar::{Scalar, ScalarKind};

    fn parse(source: &str) -> Object {
        parse_str(source, &Limits::default()).expect("Failed to parse input")
    }

    #[test]
    fn test_unknown_object() {
        let rules = Rules::new().with("h1", ArgCount::Exactly(1));
        let mut tree = parse("@h2{x}");

        let err = validate(&mut tree, &rules, &Limits::default()).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::UnknownObject));
        assert_eq!(err.first().and_then(Diagnostic::code), Some(ErrorCode::E100));
    }

    #[test]
    fn test_unknown_nested_object() {
        let rules = Rules::new().with("p", ArgCount::Any);
        let mut tree = parse("@p{a @b{c}}");

        let err = validate(&mut tree, &rules, &Limits::default()).unwrap_err();
        assert_eq!(err.to_string(), "error[E100]: object `@b` not defined");
    }

    #[test]
    fn test_arity() {
        let rules = Rules::new().with("img", ArgCount::Exactly(2));
        let mut tree = parse("@img{caption}");

        let err = validate(&mut tree, &rules, &Limits::default()).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Arity));
        assert_eq!(
            err.to_string(),
            "error[E101]: object `@img`: expected exactly 2 arguments, found 1"
        );
    }

    #[test]
    fn test_cast_values_are_recorded() {
        let rules = Rules::new().with("image", CastArgs::new([None, Some(ScalarKind::String)]));
        let mut tree = parse("@image{alt}{http://x}");

        validate(&mut tree, &rules, &Limits::default()).expect("valid tree");
        assert!(tree.args()[0].cast_value().is_none());
        assert_eq!(
            tree.args()[1].cast_value(),
            Some(&Scalar::String("http://x".to_string()))
        );
    }

    #[test]
    fn test_cast_failure() {
        let rules = Rules::new().with("size", CastArgs::new([Some(ScalarKind::Int)]));
        let mut tree = parse("@size{large}");

        let err = validate(&mut tree, &rules, &Limits::default()).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Cast));
        assert_eq!(err.first().and_then(Diagnostic::code), Some(ErrorCode::E103));
    }

    #[test]
    fn test_cast_of_non_text_argument() {
        let rules = Rules::new()
            .with("size", CastArgs::new([Some(ScalarKind::Int)]))
            .with("b", ArgCount::Any);
        let mut tree = parse("@size{@b{1}}");

        let err = validate(&mut tree, &rules, &Limits::default()).unwrap_err();
        assert_eq!(err.first().and_then(Diagnostic::code), Some(ErrorCode::E102));
    }

    #[test]
    fn test_failed_validation_leaves_tree_untouched() {
        let rules = Rules::new()
            .with("row", CastArgs::new([Some(ScalarKind::Int)]))
            .with("table", ArgCount::Exactly(5));
        let mut tree = parse("@table{@row{1}@row{2}}");
        let before = tree.clone();

        for order in [VisitOrder::ChildrenFirst, VisitOrder::ParentFirst] {
            let result = Validator::new(&rules).with_order(order).validate(&mut tree);
            assert!(result.is_err());
            assert_eq!(tree, before);
        }
    }

    #[test]
    fn test_casts_in_nested_objects() {
        let rules = Rules::new()
            .with("row", CastArgs::new([Some(ScalarKind::Int)]))
            .with("table", ArgCount::Any);

        for order in [VisitOrder::ChildrenFirst, VisitOrder::ParentFirst] {
            let mut tree = parse("@table{@row{1} @row{2}}");
            Validator::new(&rules)
                .with_order(order)
                .validate(&mut tree)
                .expect("valid tree");

            let values: Vec<_> = tree.args()[0]
                .elements()
                .iter()
                .filter_map(Element::as_object)
                .map(|row| row.args()[0].cast_value().cloned())
                .collect();
            assert_eq!(values, vec![Some(Scalar::Int(1)), Some(Scalar::Int(2))]);
        }
    }

    #[test]
    fn test_revalidation_clears_previous_casts() {
        let mut tree = parse("@n{5}");

        let casting = Rules::new().with("n", CastArgs::new([Some(ScalarKind::Int)]));
        validate(&mut tree, &casting, &Limits::default()).expect("valid tree");
        assert_eq!(tree.args()[0].cast_value(), Some(&Scalar::Int(5)));

        let plain = Rules::new().with("n", ArgCount::Exactly(1));
        validate(&mut tree, &plain, &Limits::default()).expect("valid tree");
        assert!(tree.args()[0].cast_value().is_none());
    }

    #[test]
    fn test_visit_order_decides_which_error_is_reported() {
        let rules = Rules::new().with("p", ArgCount::Exactly(1));
        let mut tree = parse("@p{@q{x}}{extra}");

        let children_first = Validator::new(&rules).validate(&mut tree).unwrap_err();
        assert_eq!(children_first.kind(), Some(ErrorKind::UnknownObject));

        let parent_first = Validator::new(&rules)
            .with_order(VisitOrder::ParentFirst)
            .validate(&mut tree)
            .unwrap_err();
        assert_eq!(parent_first.kind(), Some(ErrorKind::Arity));
    }

    #[test]
    fn test_depth_limit() {
        let rules = Rules::new().with("a", ArgCount::Any);
        let mut tree = parse("@a{@a{@a{}}}");

        let err = validate(&mut tree, &rules, &Limits::new(2)).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Limit));
        assert!(validate(&mut tree, &rules, &Limits::new(3)).is_ok());
    }
}
