//! Argument shapes for catalogue nodes.
//!
//! Each shape is one argument-binding contract. Binding consumes the ordered
//! list of already-bound content blocks of an object and either produces the
//! shape with every field populated or reports which part of the contract
//! was violated.

use std::{fmt, str::FromStr};

use thiserror::Error;

use super::node::{ContentBlock, SemNode};

/// A violated argument contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The object has the wrong number of arguments.
    #[error("expected exactly {expected} arguments, found {found}")]
    ArgCount { expected: usize, found: usize },

    /// An argument that must hold a single child holds some other number.
    #[error("argument {} must have exactly 1 child, found {found}", .index + 1)]
    ChildCount { index: usize, found: usize },

    /// An argument that must hold plain text holds an object.
    #[error("argument {} must be plain text", .index + 1)]
    NotText { index: usize },
}

/// Move exactly `COUNT` content blocks out of `args`.
fn exact<B, const COUNT: usize>(args: Vec<B>) -> Result<[B; COUNT], ShapeError> {
    <[B; COUNT]>::try_from(args).map_err(|args| ShapeError::ArgCount {
        expected: COUNT,
        found: args.len(),
    })
}

/// Extract the single text child of a content block.
fn extract_text<N>(block: ContentBlock<N>, index: usize) -> Result<String, ShapeError> {
    let found = block.len();
    match <[SemNode<N>; 1]>::try_from(block.into_elements()) {
        Ok([SemNode::Text(text)]) => Ok(text),
        Ok(_) => Err(ShapeError::NotText { index }),
        Err(_) => Err(ShapeError::ChildCount { index, found }),
    }
}

/// Exactly one content block.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleArg<N> {
    pub content: ContentBlock<N>,
}

impl<N> SingleArg<N> {
    pub fn bind(args: Vec<ContentBlock<N>>) -> Result<Self, ShapeError> {
        let [content] = exact(args)?;
        Ok(Self { content })
    }

    pub fn blocks(&self) -> Vec<&ContentBlock<N>> {
        vec![&self.content]
    }
}

/// Exactly two content blocks, kept positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct DualArg<N> {
    pub arg1: ContentBlock<N>,
    pub arg2: ContentBlock<N>,
}

impl<N> DualArg<N> {
    pub fn bind(args: Vec<ContentBlock<N>>) -> Result<Self, ShapeError> {
        let [arg1, arg2] = exact(args)?;
        Ok(Self { arg1, arg2 })
    }

    pub fn blocks(&self) -> Vec<&ContentBlock<N>> {
        vec![&self.arg1, &self.arg2]
    }
}

/// Any number of content blocks, kept in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ListArg<N> {
    pub items: Vec<ContentBlock<N>>,
}

impl<N> ListArg<N> {
    pub fn bind(args: Vec<ContentBlock<N>>) -> Result<Self, ShapeError> {
        Ok(Self { items: args })
    }

    pub fn blocks(&self) -> Vec<&ContentBlock<N>> {
        self.items.iter().collect()
    }
}

/// A caption kept as content and a link target extracted as a string.
///
/// `@img{a cat}{https://example.com/cat.png}`
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionedLink<N> {
    pub caption: ContentBlock<N>,
    pub link: String,
}

impl<N> CaptionedLink<N> {
    pub fn bind(args: Vec<ContentBlock<N>>) -> Result<Self, ShapeError> {
        let [caption, link] = exact(args)?;
        let link = extract_text(link, 1)?;
        Ok(Self { caption, link })
    }

    pub fn blocks(&self) -> Vec<&ContentBlock<N>> {
        vec![&self.caption]
    }
}

/// Two arguments, both extracted as strings.
///
/// `@code{rust}{src/main.rs}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualString {
    pub first: String,
    pub second: String,
}

impl DualString {
    pub fn bind<N>(args: Vec<ContentBlock<N>>) -> Result<Self, ShapeError> {
        let [first, second] = exact(args)?;
        Ok(Self {
            first: extract_text(first, 0)?,
            second: extract_text(second, 1)?,
        })
    }
}

/// Names the shapes, for catalogues assembled at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Single,
    Dual,
    List,
    CaptionedLink,
    DualString,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Single => "single",
            ShapeKind::Dual => "dual",
            ShapeKind::List => "list",
            ShapeKind::CaptionedLink => "captioned_link",
            ShapeKind::DualString => "dual_string",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a shape name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shape `{0}`, expected one of: single, dual, list, captioned_link, dual_string")]
pub struct UnknownShapeKind(pub String);

impl FromStr for ShapeKind {
    type Err = UnknownShapeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(ShapeKind::Single),
            "dual" => Ok(ShapeKind::Dual),
            "list" => Ok(ShapeKind::List),
            "captioned_link" => Ok(ShapeKind::CaptionedLink),
            "dual_string" => Ok(ShapeKind::DualString),
            other => Err(UnknownShapeKind(other.to_string())),
        }
    }
}

/// Any one of the shapes, selected by [`ShapeKind`] at bind time.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<N> {
    Single(SingleArg<N>),
    Dual(DualArg<N>),
    List(ListArg<N>),
    CaptionedLink(CaptionedLink<N>),
    DualString(DualString),
}

impl<N> Shape<N> {
    /// Bind `args` against the shape named by `kind`.
    pub fn bind(kind: ShapeKind, args: Vec<ContentBlock<N>>) -> Result<Self, ShapeError> {
        match kind {
            ShapeKind::Single => SingleArg::bind(args).map(Shape::Single),
            ShapeKind::Dual => DualArg::bind(args).map(Shape::Dual),
            ShapeKind::List => ListArg::bind(args).map(Shape::List),
            ShapeKind::CaptionedLink => CaptionedLink::bind(args).map(Shape::CaptionedLink),
            ShapeKind::DualString => DualString::bind(args).map(Shape::DualString),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Single(_) => ShapeKind::Single,
            Shape::Dual(_) => ShapeKind::Dual,
            Shape::List(_) => ShapeKind::List,
            Shape::CaptionedLink(_) => ShapeKind::CaptionedLink,
            Shape::DualString(_) => ShapeKind::DualString,
        }
    }

    pub fn blocks(&self) -> Vec<&ContentBlock<N>> {
        match self {
            Shape::Single(shape) => shape.blocks(),
            Shape::Dual(shape) => shape.blocks(),
            Shape::List(shape) => shape.blocks(),
            Shape::CaptionedLink(shape) => shape.blocks(),
            Shape::DualString(_) => Vec::new(),
        }
    }
}
