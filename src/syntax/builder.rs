//! Construction of [`SyntaxTree`]s.
//!
//! The parser is an external collaborator: it (or a test) allocates nodes
//! bottom-up through [`TreeBuilder`], which wires up the parent links and the
//! ordered child lists as each node is added.

use std::path::PathBuf;

use smol_str::SmolStr;

use crate::base::{FileId, Position, Span};

use super::{NodeId, NodeKind, SyntaxNode, SyntaxTree};

/// Bottom-up builder for a [`SyntaxTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with an explicit span. Children referenced by `kind` must
    /// already have been added and get `self` as their parent.
    pub fn add(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let mut children = kind.child_ids();
        children.sort_by_key(|&child| self.nodes[child.index() as usize].span.start);
        for &child in &children {
            self.nodes[child.index() as usize].parent = Some(id);
        }
        self.nodes.push(SyntaxNode {
            kind,
            span,
            parent: None,
            children,
        });
        id
    }

    /// Add a node spanning exactly its children.
    ///
    /// A node without children gets an empty span at the origin; use
    /// [`add`](Self::add) for constructs that need a real extent.
    pub fn wrap(&mut self, kind: NodeKind) -> NodeId {
        let span = self.span_of(&kind.child_ids()).unwrap_or_default();
        self.add(kind, span)
    }

    /// Smallest span covering all of `ids`.
    pub fn span_of(&self, ids: &[NodeId]) -> Option<Span> {
        ids.iter()
            .map(|id| self.nodes[id.index() as usize].span)
            .reduce(Span::cover)
    }

    pub fn identifier(&mut self, text: &str, start: Position) -> NodeId {
        let span = Span::new(start, start.offset(text.chars().count() as u32));
        self.add(NodeKind::Identifier { text: SmolStr::new(text) }, span)
    }

    pub fn keyword(&mut self, text: &str, start: Position) -> NodeId {
        let span = Span::new(start, start.offset(text.chars().count() as u32));
        self.add(NodeKind::Keyword { text: SmolStr::new(text) }, span)
    }

    pub fn literal(&mut self, text: &str, start: Position) -> NodeId {
        let span = Span::new(start, start.offset(text.chars().count() as u32));
        self.add(NodeKind::Literal { text: SmolStr::new(text) }, span)
    }

    /// Build a (possibly dotted) name written on one line starting at `start`.
    ///
    /// `"a.b.c"` nests left-associatively into compound names. A leading dot
    /// (`".a"`) leaves the outermost compound without a left side, and a
    /// trailing dot (`"a."`) leaves it without a tail.
    pub fn name(&mut self, dotted: &str, start: Position) -> NodeId {
        let mut column = start.column;
        let mut current: Option<NodeId> = None;
        for (index, segment) in dotted.split('.').enumerate() {
            let segment_len = segment.chars().count() as u32;
            let ident = (!segment.is_empty())
                .then(|| self.identifier(segment, Position::new(start.line, column)));
            column += segment_len;
            current = if index == 0 {
                ident
            } else {
                let dot = Position::new(start.line, column - segment_len - 1);
                let node_start =
                    current.map_or(dot, |c| self.nodes[c.index() as usize].span.start);
                let span = Span::new(node_start, Position::new(start.line, column));
                Some(self.add(
                    NodeKind::CompoundName {
                        compound: current,
                        name: ident,
                    },
                    span,
                ))
            };
            column += 1;
        }
        current.unwrap_or_else(|| self.identifier("", start))
    }

    /// `TypeReference` around a (possibly dotted) type name.
    pub fn type_ref(&mut self, dotted: &str, start: Position) -> NodeId {
        let type_name = self.name(dotted, start);
        self.wrap(NodeKind::TypeReference { type_name })
    }

    /// Finish with a root `File` node spanning from the origin to `end`.
    pub fn finish(
        mut self,
        file: FileId,
        path: impl Into<PathBuf>,
        statements: Vec<NodeId>,
        end: Position,
    ) -> SyntaxTree {
        let root = self.add(
            NodeKind::File { statements },
            Span::new(Position::default(), end),
        );
        SyntaxTree {
            file,
            path: path.into(),
            nodes: self.nodes,
            root,
        }
    }
}
