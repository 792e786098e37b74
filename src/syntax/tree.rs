//! Arena-backed syntax tree.
//!
//! Nodes live in a flat `Vec` and refer to each other through [`NodeId`]s.
//! Parent links are plain indices, so the tree can be walked upwards without
//! any shared ownership between nodes.

use std::path::{Path, PathBuf};

use crate::base::{FileId, Position, Span};

use super::NodeKind;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// A node addressed across files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub file: FileId,
    pub node: NodeId,
}

impl NodeRef {
    pub fn new(file: FileId, node: NodeId) -> Self {
        Self { file, node }
    }
}

/// A single node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// An immutable parsed file.
///
/// Built once through [`TreeBuilder`](super::TreeBuilder) and never mutated
/// afterwards; all IDE queries only read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub(super) file: FileId,
    pub(super) path: PathBuf,
    pub(super) nodes: Vec<SyntaxNode>,
    pub(super) root: NodeId,
}

impl SyntaxTree {
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The root `File` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0 as usize]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn node_ref(&self, id: NodeId) -> NodeRef {
        NodeRef::new(self.file, id)
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Nearest strict ancestor matching `predicate`.
    pub fn find_first_parent(
        &self,
        id: NodeId,
        predicate: impl Fn(&NodeKind) -> bool,
    ) -> Option<NodeId> {
        self.ancestors(id).find(|&ancestor| predicate(self.kind(ancestor)))
    }

    /// Preorder walk of the subtree rooted at `id`, including `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    pub fn is_scoped_block(&self, id: NodeId) -> bool {
        self.kind(id).is_scoped_block()
    }

    /// Nearest enclosing scoped block of `id` (not `id` itself).
    ///
    /// Nodes that are not attached below a scoped block fall back to the root.
    pub fn scope_of(&self, id: NodeId) -> NodeId {
        self.find_first_parent(id, NodeKind::is_scoped_block)
            .unwrap_or(self.root)
    }

    /// `scope` followed by every enclosing scoped block, nearest first.
    ///
    /// Ends at the root, which has no parent.
    pub fn scope_chain(&self, scope: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(scope).chain(
            self.ancestors(scope)
                .filter(move |&ancestor| self.is_scoped_block(ancestor)),
        )
    }

    /// Whether `id` is, or is nested inside, a node matching `predicate`.
    pub fn is_within(&self, id: NodeId, predicate: impl Fn(&NodeKind) -> bool) -> bool {
        predicate(self.kind(id)) || self.find_first_parent(id, predicate).is_some()
    }

    /// Identifier, keyword or literal text of a token node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.kind(id).token_text()
    }

    /// Render a name-like node the way it is written in source.
    ///
    /// Compound names render as `a.b.c`, with a leading dot when the left
    /// side is absent and nothing after the dot when the tail is missing.
    pub fn name_to_string(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Identifier { text }
            | NodeKind::Keyword { text }
            | NodeKind::Literal { text } => text.to_string(),
            NodeKind::CompoundName { compound, name }
            | NodeKind::CompoundBindingExpression { compound, name } => {
                let left = compound.map(|c| self.name_to_string(c)).unwrap_or_default();
                let right = name.map(|n| self.name_to_string(n)).unwrap_or_default();
                format!("{left}.{right}")
            }
            NodeKind::TypeReference { type_name } => self.name_to_string(*type_name),
            _ => String::new(),
        }
    }

    /// The deepest node whose span contains `position`.
    ///
    /// Returns `None` when the position lies outside the root. Error nodes are
    /// descended into like any other node; when none of their fragments cover
    /// the position the error node itself is the result, so callers always get
    /// a usable leaf for half-typed input.
    pub fn leaf_at(&self, position: Position) -> Option<NodeId> {
        if !self.span(self.root).contains(position) {
            return None;
        }

        let mut current = self.root;
        while let Some(&child) = self
            .children(current)
            .iter()
            .find(|&&child| self.span(child).contains(position))
        {
            current = child;
        }
        Some(current)
    }
}
