//! Semantic tree structure.

/// Capabilities every catalogue-defined node type provides.
///
/// A catalogue is usually backed by a closed enum with one variant per tag,
/// each wrapping one of the argument shapes from [`shape`](super::shape).
/// Renderers then pattern-match exhaustively over that enum.
pub trait SemanticNode: Sized {
    /// The syntax tag this node was bound from, i.e. `p` for `@p{...}`.
    fn tag(&self) -> &str;

    /// The content blocks held by this node, in argument order.
    ///
    /// Fields extracted as plain strings are not content blocks and are
    /// not returned.
    fn blocks(&self) -> Vec<&ContentBlock<Self>>;
}

/// A node of the semantic tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SemNode<N> {
    /// Literal text, bound from a syntax text run.
    Text(String),
    /// A content block, bound from one `{...}` argument.
    Block(ContentBlock<N>),
    /// A catalogue-defined node.
    Node(N),
}

impl<N: SemanticNode> SemNode<N> {
    /// The syntax tag of this node. Text and content blocks are synthetic and
    /// report the empty tag.
    pub fn tag(&self) -> &str {
        match self {
            SemNode::Text(_) | SemNode::Block(_) => "",
            SemNode::Node(node) => node.tag(),
        }
    }

    /// The direct semantic children of this node.
    ///
    /// For a catalogue node these are the elements of all its content blocks,
    /// in argument order.
    pub fn children(&self) -> Vec<&SemNode<N>> {
        match self {
            SemNode::Text(_) => Vec::new(),
            SemNode::Block(block) => block.elements().iter().collect(),
            SemNode::Node(node) => node
                .blocks()
                .into_iter()
                .flat_map(|block| block.elements())
                .collect(),
        }
    }

    /// Visit this node and all its descendants in pre-order.
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&SemNode<N>),
    {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Concatenate every text leaf below this node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |node| {
            if let SemNode::Text(text) = node {
                out.push_str(text);
            }
        });
        out
    }
}

impl<N> SemNode<N> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SemNode::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            SemNode::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// The bound content of one `{...}` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock<N> {
    elements: Vec<SemNode<N>>,
}

impl<N> ContentBlock<N> {
    /// Create a content block from bound elements.
    pub fn new(elements: Vec<SemNode<N>>) -> Self {
        Self { elements }
    }

    /// The bound elements in source order.
    pub fn elements(&self) -> &[SemNode<N>] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the text if this block holds exactly one text leaf.
    pub fn single_text(&self) -> Option<&str> {
        match self.elements.as_slice() {
            [SemNode::Text(text)] => Some(text),
            _ => None,
        }
    }

    /// Consume the block, returning its elements.
    pub fn into_elements(self) -> Vec<SemNode<N>> {
        self.elements
    }
}

impl<N: SemanticNode> ContentBlock<N> {
    /// Concatenate every text leaf inside this block.
    pub fn plain_text(&self) -> String {
        self.elements.iter().map(SemNode::plain_text).collect()
    }
}
