//! Syntax tree types.
//!
//! The syntax tree is the untyped result of parsing objective text. It mirrors
//! the notation one to one:
//!
//! ```text
//! @name{arg}{arg}...      -> Object { name, args }
//! {text @child{...} text} -> Arg { elements }
//! text                    -> Text { value }
//! ```
//!
//! Trees are built once by the parser and are read-only afterwards. The one
//! exception is [`Arg::set_cast_value`], which validation uses to record the
//! typed value a text argument was cast to.

use std::fmt;

use thiserror::Error;

use crate::scalar::Scalar;

/// Characters that must be escaped with a backslash inside text.
pub const SPECIAL_CHARS: [char; 3] = ['@', '{', '}'];

/// Returns true for the characters an object name is made of.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Error returned when an object name cannot be written in the notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid object name `{0}`, expected one or more letters, digits or underscores")]
pub struct InvalidName(pub String);

/// Either an [`Object`] or a run of [`Text`].
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Object(Object),
    Text(Text),
}

impl Element {
    /// Returns the object if this element is one.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Element::Object(object) => Some(object),
            Element::Text(_) => None,
        }
    }

    /// Returns the text if this element is one.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Object(_) => None,
            Element::Text(text) => Some(text),
        }
    }
}

impl From<Object> for Element {
    fn from(object: Object) -> Self {
        Element::Object(object)
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Element::Text(text)
    }
}

/// A named collection of arguments: `@name{arg1}{arg2}...`.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    name: String,
    args: Vec<Arg>,
}

impl Object {
    /// Create a new object.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidName`] unless `name` is a non-empty run of ASCII
    /// letters, digits and underscores.
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Result<Self, InvalidName> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(is_name_char) {
            return Err(InvalidName(name));
        }
        Ok(Self { name, args })
    }

    /// The object name, i.e. `p` in `@p{...}`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The arguments in source order.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Mutable access to the arguments, for annotating cast values.
    ///
    /// The slice cannot grow or shrink, so the shape of the tree is fixed.
    pub fn args_mut(&mut self) -> &mut [Arg] {
        &mut self.args
    }

    /// Number of arguments.
    pub fn num_args(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Object {
    /// Writes the object back out in the notation.
    ///
    /// Special characters in text are escaped. Re-parsing the output yields
    /// the same tree as long as texts carry no leading or trailing whitespace,
    /// no trailing backslash, and an argument-less object is not directly
    /// followed by text starting with an identifier character.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        for arg in &self.args {
            write!(f, "{arg}")?;
        }
        Ok(())
    }
}

/// One `{...}` block: a mixed sequence of text and nested objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arg {
    elements: Vec<Element>,
    /// Populated by validation only.
    cast_value: Option<Scalar>,
}

impl Arg {
    /// Create a new argument holding the given elements.
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            cast_value: None,
        }
    }

    /// The elements in source order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Returns the text if this argument consists of exactly one text element.
    pub fn single_text(&self) -> Option<&str> {
        match self.elements.as_slice() {
            [Element::Text(text)] => Some(text.value()),
            _ => None,
        }
    }

    /// Iterate mutably over the objects directly inside this argument.
    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut Object> {
        self.elements.iter_mut().filter_map(|element| match element {
            Element::Object(object) => Some(object),
            Element::Text(_) => None,
        })
    }

    /// The scalar this argument was cast to during validation, if any.
    pub fn cast_value(&self) -> Option<&Scalar> {
        self.cast_value.as_ref()
    }

    /// Record the scalar this argument was cast to.
    pub fn set_cast_value(&mut self, value: Option<Scalar>) {
        self.cast_value = value;
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for element in &self.elements {
            match element {
                Element::Object(object) => write!(f, "{object}")?,
                Element::Text(text) => write!(f, "{text}")?,
            }
        }
        f.write_str("}")
    }
}

/// A run of literal text with escapes already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    value: String,
}

impl Text {
    /// Create a new text element.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The literal text.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Text {
    /// Writes the text with `@`, `{` and `}` escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.value.chars() {
            if SPECIAL_CHARS.contains(&c) {
                write!(f, "\\{c}")?;
            } else {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Element {
        Element::Text(Text::new(value))
    }

    fn new_object(name: &str, args: Vec<Arg>) -> Object {
        Object::new(name, args).expect("valid object name")
    }

    #[test]
    fn test_object_accessors() {
        let object = new_object("img", vec![Arg::new(vec![text("cap")]), Arg::default()]);

        assert_eq!(object.name(), "img");
        assert_eq!(object.num_args(), 2);
        assert_eq!(object.args()[0].num_elements(), 1);
        assert_eq!(object.args()[1].num_elements(), 0);
    }

    #[test]
    fn test_object_name_must_be_writable() {
        assert_eq!(Object::new("", vec![]), Err(InvalidName(String::new())));
        assert_eq!(
            Object::new("a b", vec![]),
            Err(InvalidName("a b".to_string()))
        );
        assert!(Object::new("h_2", vec![]).is_ok());
    }

    #[test]
    fn test_single_text() {
        assert_eq!(Arg::new(vec![text("x")]).single_text(), Some("x"));
        assert_eq!(Arg::default().single_text(), None);
        assert_eq!(Arg::new(vec![text("a"), text("b")]).single_text(), None);

        let nested = Arg::new(vec![Element::Object(new_object("b", vec![]))]);
        assert_eq!(nested.single_text(), None);
    }

    #[test]
    fn test_cast_value_starts_empty() {
        let mut arg = Arg::new(vec![text("42")]);
        assert!(arg.cast_value().is_none());

        arg.set_cast_value(Some(Scalar::Int(42)));
        assert_eq!(arg.cast_value(), Some(&Scalar::Int(42)));
    }

    #[test]
    fn test_display_escapes_special_chars() {
        let object = new_object("p", vec![Arg::new(vec![text("a@b{c}")])]);
        assert_eq!(object.to_string(), r"@p{a\@b\{c\}}");
    }

    #[test]
    fn test_display_nested() {
        let object = new_object(
            "p",
            vec![Arg::new(vec![
                text("x "),
                Element::Object(new_object("b", vec![Arg::new(vec![text("y")])])),
            ])],
        );
        assert_eq!(object.to_string(), "@p{x @b{y}}");
    }

    #[test]
    fn test_objects_mut_skips_text() {
        let mut arg = Arg::new(vec![
            text("a"),
            Element::Object(new_object("b", vec![])),
            text("c"),
        ]);
        assert_eq!(arg.objects_mut().count(), 1);
    }
}
