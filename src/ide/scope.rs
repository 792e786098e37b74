//! Completion-scope classification and the scope-chain variable walker.

use smol_str::SmolStr;
use tracing::trace;

use crate::base::{Position, Span};
use crate::hir::{LanguageService, Symbol};
use crate::syntax::{NodeId, NodeKind, NodeRef, SyntaxTree};

/// How names are looked up for a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeAccess {
    /// Every name visible along the scope chain, plus keywords.
    Local,
    /// `.X`: names declared at file scope only.
    Global,
    /// `X.Y`: members of the owner's type.
    Member(Symbol),
    /// A member access whose owner did not resolve. Completion is suppressed.
    UnresolvedMember,
}

/// Where and how to complete at a cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionScope {
    pub scope: NodeId,
    pub access: ScopeAccess,
    /// Range replaced by an accepted item, when something is already typed.
    pub replacement_range: Option<Span>,
}

impl CompletionScope {
    fn new(scope: NodeId, access: ScopeAccess, replacement_range: Option<Span>) -> Self {
        Self {
            scope,
            access,
            replacement_range,
        }
    }

    fn local(scope: NodeId, replacement_range: Option<Span>) -> Self {
        Self::new(scope, ScopeAccess::Local, replacement_range)
    }

    fn member(scope: NodeId, owner: Option<Symbol>, replacement_range: Option<Span>) -> Self {
        let access = owner.map_or(ScopeAccess::UnresolvedMember, ScopeAccess::Member);
        Self::new(scope, access, replacement_range)
    }

    pub fn is_member(&self) -> bool {
        matches!(
            self.access,
            ScopeAccess::Member(_) | ScopeAccess::UnresolvedMember
        )
    }

    pub fn owning_symbol(&self) -> Option<&Symbol> {
        match &self.access {
            ScopeAccess::Member(owner) => Some(owner),
            _ => None,
        }
    }
}

/// Classify the completion request at `leaf`.
///
/// Returns `None` only when `leaf` is an error node in which no name could
/// be recovered.
pub fn completion_scope(
    service: &dyn LanguageService,
    tree: &SyntaxTree,
    leaf: NodeId,
    position: Position,
) -> Option<CompletionScope> {
    let result = match tree.kind(leaf) {
        NodeKind::Identifier { .. } => {
            let range = Some(tree.span(leaf));
            match tree.parent(leaf).map(|parent| tree.kind(parent)) {
                Some(
                    NodeKind::CompoundName {
                        compound,
                        name: Some(tail),
                    }
                    | NodeKind::CompoundBindingExpression {
                        compound,
                        name: Some(tail),
                    },
                ) if *tail == leaf => match compound {
                    // X.Y|
                    Some(left) => CompletionScope::member(
                        tree.scope_of(leaf),
                        service.symbol_of(tree, *left),
                        range,
                    ),
                    // .Y|
                    None => CompletionScope::new(tree.root(), ScopeAccess::Global, range),
                },
                // Y| or X|.Y
                _ => CompletionScope::local(tree.scope_of(leaf), range),
            }
        }
        NodeKind::CompoundName { compound, .. }
        | NodeKind::CompoundBindingExpression { compound, .. } => match compound {
            Some(left) => {
                CompletionScope::member(tree.scope_of(leaf), service.symbol_of(tree, *left), None)
            }
            None => CompletionScope::new(tree.root(), ScopeAccess::Global, None),
        },
        NodeKind::Reply { port, .. } => CompletionScope::member(
            tree.scope_of(leaf),
            port.and_then(|port| service.symbol_of(tree, port)),
            port.map(|port| tree.span(port)),
        ),
        NodeKind::GuardStatement { condition, .. } => CompletionScope::member(
            leaf,
            condition.and_then(|condition| service.symbol_of(tree, condition)),
            None,
        ),
        NodeKind::Error { .. } => {
            let recovery = service.find_name_and_owner_in_error_node(tree, leaf, position)?;
            match recovery.owning_object {
                Some(owner) => CompletionScope::new(recovery.scope, ScopeAccess::Member(owner), None),
                None => CompletionScope::local(recovery.scope, None),
            }
        }
        kind if kind.is_scoped_block() => CompletionScope::local(leaf, None),
        _ => CompletionScope::local(tree.scope_of(leaf), None),
    };

    trace!(
        leaf = tree.kind(leaf).name(),
        scope = tree.kind(result.scope).name(),
        access = ?result.access,
        "classified completion scope"
    );
    Some(result)
}

/// Whether completion makes sense at `leaf`.
///
/// The name being declared is never completed, nor is anything inside an
/// enum, extern or subint definition.
pub fn should_complete(tree: &SyntaxTree, leaf: NodeId) -> bool {
    if !matches!(tree.kind(leaf), NodeKind::Identifier { .. }) {
        return true;
    }
    let Some(parent) = tree.parent(leaf) else {
        return true;
    };
    match tree.kind(parent) {
        NodeKind::EnumDefinition { .. }
        | NodeKind::ExternDeclaration { .. }
        | NodeKind::IntDefinition { .. } => false,
        kind @ (NodeKind::VariableDefinition { .. }
        | NodeKind::FunctionParameter { .. }
        | NodeKind::OnParameter { .. }
        | NodeKind::EventParameter { .. }
        | NodeKind::Port { .. }
        | NodeKind::Event { .. }
        | NodeKind::Instance { .. }
        | NodeKind::FunctionDefinition { .. }
        | NodeKind::ComponentDefinition { .. }
        | NodeKind::InterfaceDefinition { .. }) => kind.declaration_name() != Some(leaf),
        _ => true,
    }
}

/// Every `(name, declaration)` visible at `scope`, nearest scope first.
///
/// Names declared in several scopes appear once per scope; callers wanting
/// innermost-wins semantics keep the first occurrence.
pub fn visible_variables(
    service: &dyn LanguageService,
    tree: &SyntaxTree,
    scope: NodeId,
) -> Vec<(SmolStr, NodeRef)> {
    tree.scope_chain(scope)
        .flat_map(|s| service.declared_variables_at(tree, s))
        .collect()
}
