//! Raw syntax tree produced by the parser.
//!
//! The raw tree borrows every name and text run from the input, so parsing
//! allocates nothing but the element vectors. Text runs are still escaped;
//! [`normalize`](crate::normalize) trims them and resolves escapes while
//! converting into the owned [`obtext_core::syntax`] tree.

use crate::span::Span;

/// `@name{...}{...}` as it appears in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject<'src> {
    pub name: &'src str,
    /// From the `@` to the closing brace of the last argument.
    pub span: Span,
    pub args: Vec<RawArg<'src>>,
}

/// One `{...}` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawArg<'src> {
    pub elements: Vec<RawElement<'src>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawElement<'src> {
    Object(RawObject<'src>),
    /// A maximal run of text, escapes unresolved.
    Text(&'src str),
}
