//! Semantic document model types.
//!
//! This module contains the typed representation of a document after its
//! syntax tree has been bound against a catalogue of node prototypes.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Bytes
//!     ↓ parser
//! Syntax Tree (syntax) - objects, arguments and text
//!     ↓ validate (optional)
//! Annotated Syntax Tree - cast values recorded on arguments
//!     ↓ bind against a catalogue
//! Semantic Tree (these types) - closed node set with enforced argument shapes
//!     ↓ render
//! Markdown / HTML
//! ```
//!
//! # Organization
//!
//! - [`node`] - Tree structure: [`SemNode`], [`ContentBlock`], [`SemanticNode`]
//! - [`shape`] - Argument contracts: [`SingleArg`], [`DualArg`], [`ListArg`],
//!   [`CaptionedLink`], [`DualString`]
//! - [`tagged`] - [`TaggedNode`], a node type for catalogues assembled at runtime

pub mod node;
pub mod shape;
pub mod tagged;

pub use node::*;
pub use shape::*;
pub use tagged::*;
