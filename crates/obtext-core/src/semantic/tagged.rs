//! A semantic node type for catalogues assembled at runtime.

use super::{
    node::{ContentBlock, SemanticNode},
    shape::{Shape, ShapeError, ShapeKind},
};

/// A catalogue node that carries its own tag and one of the standard shapes.
///
/// Useful when the set of tags is only known at runtime, e.g. built from
/// `(tag, shape)` pairs named by strings. Renderers match on
/// [`TaggedNode::tag`] and then on the [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedNode {
    tag: String,
    shape: Shape<TaggedNode>,
}

impl TaggedNode {
    /// Bind `args` against `kind`, producing a node tagged `tag`.
    pub fn bind(
        tag: impl Into<String>,
        kind: ShapeKind,
        args: Vec<ContentBlock<TaggedNode>>,
    ) -> Result<Self, ShapeError> {
        Ok(Self {
            tag: tag.into(),
            shape: Shape::bind(kind, args)?,
        })
    }

    pub fn shape(&self) -> &Shape<TaggedNode> {
        &self.shape
    }
}

impl SemanticNode for TaggedNode {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn blocks(&self) -> Vec<&ContentBlock<Self>> {
        self.shape.blocks()
    }
}
