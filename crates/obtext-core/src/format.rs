//! Indented dump of a syntax tree.
//!
//! Each object is printed as `@name` followed by its arguments, one brace per
//! line, with nested elements indented by two spaces:
//!
//! ```text
//! @p
//! {
//!   some text
//!   @b
//!   {
//!     bold
//!   }
//! }
//! ```

use std::fmt::Write as _;

use crate::syntax::{Element, Object};

const INDENT: &str = "  ";

/// Format a syntax tree as an indented, human readable dump.
pub fn format_syntax(object: &Object) -> String {
    let mut out = String::new();
    write_object(&mut out, object, "");
    out
}

fn write_object(out: &mut String, object: &Object, indent: &str) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{indent}@{}", object.name());
    let nested = format!("{indent}{INDENT}");
    for arg in object.args() {
        let _ = writeln!(out, "{indent}{{");
        for element in arg.elements() {
            match element {
                Element::Object(child) => write_object(out, child, &nested),
                Element::Text(text) => {
                    let _ = writeln!(out, "{nested}{}", text.value());
                }
            }
        }
        let _ = writeln!(out, "{indent}}}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Arg, Text};

    #[test]
    fn test_format_object_without_args() {
        let object = Object::new("br", vec![]).expect("valid object name");
        assert_eq!(format_syntax(&object), "@br\n");
    }

    #[test]
    fn test_format_nested() {
        let object = Object::new(
            "p",
            vec![Arg::new(vec![
                Element::Text(Text::new("some text")),
                Element::Object(
                    Object::new("b", vec![Arg::new(vec![Element::Text(Text::new("bold"))])])
                        .expect("valid object name"),
                ),
            ])],
        )
        .expect("valid object name");

        let expected = "@p\n{\n  some text\n  @b\n  {\n    bold\n  }\n}\n";
        assert_eq!(format_syntax(&object), expected);
    }
}
