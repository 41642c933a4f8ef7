//! Binding a syntax tree to a catalogue of typed nodes.
//!
//! A [`Catalogue`] maps object names to [`Prototype`]s. Binding resolves
//! every object of the syntax tree through the catalogue, children before
//! parents: the arguments of an object are bound into content blocks first,
//! then the prototype turns the ordered blocks into a node, checking its
//! argument contract on already-bound content.
//!
//! ```
//! # use obtext_core::semantic::{ContentBlock, SemanticNode, SingleArg};
//! # use obtext_parser::{Limits, parse_str};
//! # use obtext_parser::bind::{Catalogue, Prototype, bind};
//! #[derive(Debug)]
//! enum Node {
//!     Para(SingleArg<Node>),
//! }
//!
//! impl SemanticNode for Node {
//!     fn tag(&self) -> &str {
//!         "p"
//!     }
//!
//!     fn blocks(&self) -> Vec<&ContentBlock<Node>> {
//!         match self {
//!             Node::Para(para) => para.blocks(),
//!         }
//!     }
//! }
//!
//! let catalogue = Catalogue::new([Prototype::single("p", Node::Para)]).unwrap();
//! let tree = parse_str("@p{Hello}", &Limits::default()).unwrap();
//! let root = bind(&tree, &catalogue, &Limits::default()).unwrap();
//!
//! assert_eq!(root.tag(), "p");
//! assert_eq!(root.plain_text(), "Hello");
//! ```

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use obtext_core::{
    semantic::{
        CaptionedLink, ContentBlock, DualArg, DualString, ListArg, SemNode, ShapeError, ShapeKind,
        SingleArg, TaggedNode,
    },
    syntax::{Arg, Element, Object},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    limits::Limits,
    validate::depth_error,
};

type BindFn<N> = dyn Fn(Vec<ContentBlock<N>>) -> Result<N, ShapeError> + Send + Sync;

/// Binds the arguments of objects with one tag into a node.
pub struct Prototype<N> {
    tag: String,
    binder: Box<BindFn<N>>,
}

impl<N> Prototype<N> {
    /// Create a prototype from a binding closure.
    ///
    /// The closure receives the bound arguments in order and must enforce
    /// the argument contract of the node it builds.
    pub fn new(
        tag: impl Into<String>,
        binder: impl Fn(Vec<ContentBlock<N>>) -> Result<N, ShapeError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            tag: tag.into(),
            binder: Box::new(binder),
        }
    }

    /// The object name this prototype binds.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Build a fresh node from bound arguments.
    pub fn bind(&self, args: Vec<ContentBlock<N>>) -> Result<N, ShapeError> {
        (self.binder)(args)
    }
}

impl<N: 'static> Prototype<N> {
    /// Exactly one argument, e.g. `@p{...}`.
    pub fn single(
        tag: impl Into<String>,
        wrap: impl Fn(SingleArg<N>) -> N + Send + Sync + 'static,
    ) -> Self {
        Self::new(tag, move |args| SingleArg::bind(args).map(&wrap))
    }

    /// Exactly two arguments, e.g. `@section{heading}{body}`.
    pub fn dual(
        tag: impl Into<String>,
        wrap: impl Fn(DualArg<N>) -> N + Send + Sync + 'static,
    ) -> Self {
        Self::new(tag, move |args| DualArg::bind(args).map(&wrap))
    }

    /// Any number of arguments, e.g. `@itemize{a}{b}{c}`.
    pub fn list(
        tag: impl Into<String>,
        wrap: impl Fn(ListArg<N>) -> N + Send + Sync + 'static,
    ) -> Self {
        Self::new(tag, move |args| ListArg::bind(args).map(&wrap))
    }

    /// A caption and a plain text link, e.g. `@img{caption}{url}`.
    pub fn captioned_link(
        tag: impl Into<String>,
        wrap: impl Fn(CaptionedLink<N>) -> N + Send + Sync + 'static,
    ) -> Self {
        Self::new(tag, move |args| CaptionedLink::bind(args).map(&wrap))
    }

    /// Two plain text arguments, e.g. `@code{rust}{main.rs}`.
    pub fn dual_string(
        tag: impl Into<String>,
        wrap: impl Fn(DualString) -> N + Send + Sync + 'static,
    ) -> Self {
        Self::new(tag, move |args| DualString::bind(args).map(&wrap))
    }
}

impl Prototype<TaggedNode> {
    /// A prototype for the runtime-tagged node type.
    pub fn tagged(tag: impl Into<String>, kind: ShapeKind) -> Self {
        let tag = tag.into();
        let node_tag = tag.clone();
        Self::new(tag, move |args| TaggedNode::bind(node_tag.as_str(), kind, args))
    }
}

impl<N> fmt::Debug for Prototype<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prototype")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// The set of prototypes that defines which objects are legal.
pub struct Catalogue<N> {
    prototypes: IndexMap<String, Prototype<N>>,
}

impl<N> Catalogue<N> {
    /// Build a catalogue, rejecting duplicate and empty tags.
    ///
    /// Every offending prototype is reported, not just the first.
    pub fn new(prototypes: impl IntoIterator<Item = Prototype<N>>) -> Result<Self, ParseError> {
        let mut diagnostics = DiagnosticCollector::new();
        let mut map = IndexMap::new();

        for prototype in prototypes {
            if prototype.tag.is_empty() {
                diagnostics.emit(
                    Diagnostic::error("prototype with an empty tag")
                        .with_code(ErrorCode::E203)
                        .with_help("the empty tag is reserved for text and content blocks"),
                );
                continue;
            }
            if map.contains_key(&prototype.tag) {
                diagnostics.emit(
                    Diagnostic::error(format!("duplicate tag `{}`", prototype.tag))
                        .with_code(ErrorCode::E202)
                        .with_help("register each tag only once"),
                );
                continue;
            }
            map.insert(prototype.tag.clone(), prototype);
        }

        diagnostics.finish()?;
        Ok(Self { prototypes: map })
    }

    pub fn get(&self, tag: &str) -> Option<&Prototype<N>> {
        self.prototypes.get(tag)
    }

    /// The registered tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.prototypes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

impl<N> fmt::Debug for Catalogue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tags()).finish()
    }
}

struct Binder<'c, N> {
    catalogue: &'c Catalogue<N>,
    limits: &'c Limits,
}

impl<N> Binder<'_, N> {
    fn bind_object(&self, object: &Object, depth: usize) -> Result<N, Diagnostic> {
        if self.limits.exceeds(depth) {
            return Err(depth_error(object, self.limits));
        }

        let name = object.name();
        let Some(prototype) = self.catalogue.get(name) else {
            return Err(Diagnostic::error(format!("object `@{name}` not defined"))
                .with_code(ErrorCode::E200)
                .with_help(format!("add a prototype for `{name}` to the catalogue")));
        };

        let blocks = object
            .args()
            .iter()
            .map(|arg| self.bind_arg(arg, depth))
            .collect::<Result<Vec<_>, _>>()?;

        prototype.bind(blocks).map_err(|err| {
            Diagnostic::error(format!("object `@{name}`: {err}")).with_code(ErrorCode::E201)
        })
    }

    fn bind_arg(&self, arg: &Arg, depth: usize) -> Result<ContentBlock<N>, Diagnostic> {
        let elements = arg
            .elements()
            .iter()
            .map(|element| match element {
                Element::Text(text) => Ok(SemNode::Text(text.value().to_string())),
                Element::Object(child) => self.bind_object(child, depth + 1).map(SemNode::Node),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ContentBlock::new(elements))
    }
}

/// Bind `root` against `catalogue`.
///
/// Stops at the first unknown object or violated argument contract and
/// returns no partial tree.
pub fn bind<N>(
    root: &Object,
    catalogue: &Catalogue<N>,
    limits: &Limits,
) -> Result<SemNode<N>, ParseError> {
    let binder = Binder { catalogue, limits };
    let node = binder.bind_object(root, 1)?;
    debug!(root = root.name(), tags = catalogue.len(); "Bound semantic tree");
    Ok(SemNode::Node(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, parse_str};
    use obtext_core::semantic::{Shape, SemanticNode};

    fn parse(source: &str) -> Object {
        parse_str(source, &Limits::default()).expect("Failed to parse input")
    }

    fn tagged_catalogue() -> Catalogue<TaggedNode> {
        Catalogue::new([
            Prototype::tagged("p", ShapeKind::Single),
            Prototype::tagged("b", ShapeKind::Single),
            Prototype::tagged("img", ShapeKind::CaptionedLink),
            Prototype::tagged("ul", ShapeKind::List),
        ])
        .expect("valid catalogue")
    }

    #[test]
    fn test_bind_text_and_nested_objects() {
        let tree = parse("@p{plain @b{bold} tail}");
        let root = bind(&tree, &tagged_catalogue(), &Limits::default()).expect("binds");

        assert_eq!(root.tag(), "p");
        let children = root.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].as_text(), Some("plain "));
        assert_eq!(children[1].tag(), "b");
        assert_eq!(children[2].as_text(), Some(" tail"));
        assert_eq!(root.plain_text(), "plain bold tail");
    }

    #[test]
    fn test_bind_captioned_link() {
        let tree = parse("@img{caption}{https://x}");
        let root = bind(&tree, &tagged_catalogue(), &Limits::default()).expect("binds");

        let node = root.as_node().expect("catalogue node");
        match node.shape() {
            Shape::CaptionedLink(link) => {
                assert_eq!(link.link, "https://x");
                assert_eq!(link.caption.plain_text(), "caption");
            }
            other => panic!("Expected captioned link, got {other:?}"),
        }
    }

    #[test]
    fn test_arity_violation() {
        let tree = parse("@img{caption}");
        let err = bind(&tree, &tagged_catalogue(), &Limits::default()).unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::Arity));
        assert_eq!(
            err.to_string(),
            "error[E201]: object `@img`: expected exactly 2 arguments, found 1"
        );
    }

    #[test]
    fn test_nested_arity_violation_aborts_bind() {
        let tree = parse("@ul{@p{ok}}{@img{caption}{@b{x}}}");
        let err = bind(&tree, &tagged_catalogue(), &Limits::default()).unwrap_err();

        assert_eq!(err.first().and_then(Diagnostic::code), Some(ErrorCode::E201));
    }

    #[test]
    fn test_unknown_object() {
        let tree = parse("@h2{x}");
        let err = bind(&tree, &tagged_catalogue(), &Limits::default()).unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::UnknownObject));
        assert_eq!(err.to_string(), "error[E200]: object `@h2` not defined");
    }

    #[test]
    fn test_catalogue_rejects_duplicate_and_empty_tags() {
        let err = Catalogue::new([
            Prototype::tagged("p", ShapeKind::Single),
            Prototype::tagged("", ShapeKind::Single),
            Prototype::tagged("p", ShapeKind::Dual),
            Prototype::tagged("b", ShapeKind::Single),
            Prototype::tagged("b", ShapeKind::Single),
        ])
        .unwrap_err();

        let codes: Vec<_> = err.diagnostics().iter().filter_map(Diagnostic::code).collect();
        assert_eq!(codes, vec![ErrorCode::E203, ErrorCode::E202, ErrorCode::E202]);
        assert_eq!(err.kind(), Some(ErrorKind::Catalogue));
    }

    #[test]
    fn test_catalogue_keeps_registration_order() {
        let catalogue = tagged_catalogue();
        assert_eq!(catalogue.tags().collect::<Vec<_>>(), vec!["p", "b", "img", "ul"]);
        assert_eq!(catalogue.len(), 4);
    }

    #[test]
    fn test_custom_prototype() {
        let catalogue = Catalogue::new([Prototype::new("hr", |args: Vec<ContentBlock<TaggedNode>>| {
            if args.is_empty() {
                TaggedNode::bind("hr", ShapeKind::List, args)
            } else {
                Err(ShapeError::ArgCount {
                    expected: 0,
                    found: args.len(),
                })
            }
        })])
        .expect("valid catalogue");

        assert!(bind(&parse("@hr"), &catalogue, &Limits::default()).is_ok());
        assert!(bind(&parse("@hr{x}"), &catalogue, &Limits::default()).is_err());
    }

    #[test]
    fn test_depth_limit() {
        let tree = parse("@p{@p{@p{x}}}");
        let err = bind(&tree, &tagged_catalogue(), &Limits::new(2)).unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::Limit));
    }

    #[test]
    fn test_blocks_of_bound_node() {
        let tree = parse("@ul{a}{b}{c}");
        let root = bind(&tree, &tagged_catalogue(), &Limits::default()).expect("binds");

        let node = root.as_node().expect("catalogue node");
        assert_eq!(node.blocks().len(), 3);
    }
}
