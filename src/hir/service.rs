//! The semantic collaborator consumed by the IDE queries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{FileId, Position};
use crate::syntax::{NodeId, NodeKind, NodeRef, SyntaxTree};

/// Semantic identity of a declaration.
///
/// Several reference sites may resolve to the same symbol; the symbol points
/// at its declaring node but does not own it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: SmolStr,
    pub declaration: NodeRef,
}

impl Symbol {
    pub fn new(name: impl Into<SmolStr>, declaration: NodeRef) -> Self {
        Self {
            name: name.into(),
            declaration,
        }
    }
}

/// Resolved static type of a symbol or expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Resolution failed.
    Error,
    /// `bool`, `void` or an integer.
    Builtin(SmolStr),
    /// A user declaration (interface, component, enum, event, ...).
    Declared(NodeRef),
}

impl Type {
    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn declaration(&self) -> Option<NodeRef> {
        match self {
            Type::Declared(declaration) => Some(*declaration),
            _ => None,
        }
    }
}

/// Outcome of name recovery inside an error node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecovery {
    /// Scope the recovered name lives in.
    pub scope: NodeId,
    /// Object whose members are being accessed, if the fragment was dotted.
    pub owning_object: Option<Symbol>,
}

/// Parser + type checker as seen by the IDE queries.
///
/// All methods are synchronous reads against a consistent snapshot.
pub trait LanguageService {
    /// Parsed tree of a file, if it is known.
    fn syntax_tree(&self, file: FileId) -> Option<Arc<SyntaxTree>>;

    /// Deepest node covering `position`.
    fn leaf_at(&self, tree: &SyntaxTree, position: Position) -> Option<NodeId> {
        tree.leaf_at(position)
    }

    /// Resolve a reference or declaration site to its symbol.
    fn symbol_of(&self, tree: &SyntaxTree, node: NodeId) -> Option<Symbol>;

    /// Static type of a symbol, or [`Type::Error`].
    fn type_of_symbol(&self, symbol: &Symbol) -> Type;

    /// Static type of an expression or name node, or [`Type::Error`].
    fn type_of_node(&self, tree: &SyntaxTree, node: NodeId) -> Type;

    /// Members of a type, in declaration order.
    fn members_of(&self, ty: &Type) -> IndexMap<SmolStr, Symbol>;

    /// Variables declared directly in `scope` (not inherited from parents).
    fn declared_variables_at(&self, tree: &SyntaxTree, scope: NodeId) -> IndexMap<SmolStr, NodeRef>;

    /// Best-effort search for the name being typed inside a malformed subtree.
    fn find_name_and_owner_in_error_node(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        position: Position,
    ) -> Option<ErrorRecovery>;

    /// Path an `import` statement refers to when resolved against `root`.
    fn resolve_import_target(&self, tree: &SyntaxTree, import: NodeId, root: &Path) -> Option<PathBuf> {
        let NodeKind::ImportStatement { file_name } = tree.kind(import) else {
            return None;
        };
        let candidate = root.join(file_name.as_str());
        candidate.exists().then_some(candidate)
    }
}
