//! Whitespace normalization and escape resolution.
//!
//! Runs three passes over a successfully parsed raw tree, in this order:
//!
//! 1. Drop every text run that consists only of whitespace.
//! 2. Trim leading whitespace from the first element of every argument and
//!    trailing whitespace from the last one, when those are text.
//! 3. Resolve `\@`, `\{` and `\}` escapes while converting into the owned
//!    [`obtext_core::syntax`] tree.
//!
//! Pass 2 must see the list left by pass 1 to find the real first and last
//! children, and escapes are resolved last so an escaped character is never
//! mistaken for whitespace or structure.

use log::trace;

use obtext_core::syntax::{Arg, Element, Object, SPECIAL_CHARS, Text};

use crate::{
    error::{Diagnostic, ErrorCode},
    parser_types::{RawArg, RawElement, RawObject},
};

/// The whitespace set used for the outer trim, blank detection and edge
/// trimming.
pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Apply all three passes and produce the final syntax tree.
///
/// Fails only if an object name is not writable in the notation, which the
/// grammar already rules out for parsed input.
pub fn normalize(mut root: RawObject<'_>) -> Result<Object, Diagnostic> {
    drop_blank_texts(&mut root);
    trim_edges(&mut root);
    let object = into_object(root)?;
    trace!(name = object.name(); "Normalized syntax tree");
    Ok(object)
}

/// Pass 1.
fn drop_blank_texts(object: &mut RawObject<'_>) {
    for arg in &mut object.args {
        arg.elements.retain(|element| match element {
            RawElement::Text(text) => !text.chars().all(is_whitespace),
            RawElement::Object(_) => true,
        });
        for element in &mut arg.elements {
            if let RawElement::Object(child) = element {
                drop_blank_texts(child);
            }
        }
    }
}

/// Pass 2.
fn trim_edges(object: &mut RawObject<'_>) {
    for arg in &mut object.args {
        if let Some(RawElement::Text(first)) = arg.elements.first_mut() {
            *first = first.trim_start_matches(is_whitespace);
        }
        if let Some(RawElement::Text(last)) = arg.elements.last_mut() {
            *last = last.trim_end_matches(is_whitespace);
        }
        for element in &mut arg.elements {
            if let RawElement::Object(child) = element {
                trim_edges(child);
            }
        }
    }
}

/// Pass 3, converting as it goes.
fn into_object(object: RawObject<'_>) -> Result<Object, Diagnostic> {
    let span = object.span;
    let args = object
        .args
        .into_iter()
        .map(into_arg)
        .collect::<Result<_, _>>()?;
    Object::new(object.name, args).map_err(|err| {
        Diagnostic::error(err.to_string())
            .with_code(ErrorCode::E002)
            .with_label(span, "invalid object name")
    })
}

fn into_arg(arg: RawArg<'_>) -> Result<Arg, Diagnostic> {
    let elements = arg
        .elements
        .into_iter()
        .map(|element| match element {
            RawElement::Object(child) => into_object(child).map(Element::Object),
            RawElement::Text(text) => Ok(Element::Text(Text::new(unescape(text)))),
        })
        .collect::<Result<_, _>>()?;
    Ok(Arg::new(elements))
}

/// Resolve escapes left to right.
///
/// A backslash followed by `@`, `{` or `}` becomes that character. Any other
/// backslash, including a trailing one, is kept literally.
pub(crate) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && SPECIAL_CHARS.contains(&next)
        {
            out.push(next);
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn raw_object<'a>(name: &'a str, args: Vec<RawArg<'a>>) -> RawObject<'a> {
        RawObject {
            name,
            span: Span::default(),
            args,
        }
    }

    fn raw_arg(elements: Vec<RawElement<'_>>) -> RawArg<'_> {
        RawArg { elements }
    }

    #[test]
    fn test_unwritable_name_is_rejected() {
        let root = raw_object("p", vec![raw_arg(vec![RawElement::Object(raw_object("", vec![]))])]);

        let diag = normalize(root).unwrap_err();
        assert_eq!(diag.code(), Some(ErrorCode::E002));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\@b"), "a@b");
        assert_eq!(unescape(r"a\{b\}c"), "a{b}c");
        assert_eq!(unescape(r"C:\path"), r"C:\path");
        assert_eq!(unescape(r"end\"), r"end\");
        assert_eq!(unescape(r"\\@"), r"\@");
    }

    #[test]
    fn test_blank_texts_are_dropped() {
        let root = raw_object(
            "ul",
            vec![raw_arg(vec![
                RawElement::Text(" \n "),
                RawElement::Object(raw_object("li", vec![raw_arg(vec![RawElement::Text("a")])])),
                RawElement::Text("\t"),
                RawElement::Object(raw_object("li", vec![raw_arg(vec![RawElement::Text("b")])])),
                RawElement::Text("\r\n"),
            ])],
        );

        let object = normalize(root).expect("Failed to normalize");
        let elements = object.args()[0].elements();
        assert_eq!(elements.len(), 2);
        assert!(elements.iter().all(|element| element.as_object().is_some()));
    }

    #[test]
    fn test_edges_are_trimmed_after_blank_removal() {
        // The trailing blank run goes first, leaving an object in last place.
        let root = raw_object(
            "p",
            vec![raw_arg(vec![
                RawElement::Text("  a "),
                RawElement::Object(raw_object("b", vec![])),
                RawElement::Text(" x "),
                RawElement::Object(raw_object("i", vec![])),
                RawElement::Text("   "),
            ])],
        );

        let object = normalize(root).expect("Failed to normalize");
        let elements = object.args()[0].elements();
        assert_eq!(elements.len(), 4);
        assert_eq!(elements[0].as_text().map(Text::value), Some("a "));
        assert_eq!(elements[2].as_text().map(Text::value), Some(" x "));
    }

    #[test]
    fn test_escaped_specials_survive_trimming() {
        let root = raw_object("p", vec![raw_arg(vec![RawElement::Text(r" \@ ")])]);

        let object = normalize(root).expect("Failed to normalize");
        assert_eq!(object.args()[0].single_text(), Some("@"));
    }
}
