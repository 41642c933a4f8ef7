//! Obtext Core Types
//!
//! This crate provides the tree types shared by every stage of the objective
//! text pipeline. It includes:
//!
//! - **Syntax**: The untyped parse tree of objects, arguments and text ([`syntax`] module)
//! - **Scalars**: Typed values that validation can cast text arguments to ([`scalar`] module)
//! - **Semantic**: The catalogue-bound document tree and argument shapes ([`semantic`] module)
//! - **Format**: A plain indented dump of a syntax tree ([`format`] module)

pub mod format;
pub mod scalar;
pub mod semantic;
pub mod syntax;
