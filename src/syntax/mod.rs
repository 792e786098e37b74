//! Syntax layer: the arena tree the IDE queries run against.
//!
//! - [`SyntaxTree`] - immutable per-file arena of [`SyntaxNode`]s
//! - [`NodeKind`] - closed sum type of Dezyne constructs
//! - [`TreeBuilder`] - bottom-up construction used by the external parser
//!
//! Parsing itself lives outside this crate; it only has to produce a tree
//! through [`TreeBuilder`].

mod builder;
mod kind;
mod tree;

pub use builder::TreeBuilder;
pub use kind::NodeKind;
pub use tree::{NodeId, NodeRef, SyntaxNode, SyntaxTree};
