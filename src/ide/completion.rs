//! Completion suggestions implementation.

use smol_str::SmolStr;
use tracing::debug;

use crate::base::{Position, Span};
use crate::hir::LanguageService;
use crate::syntax::{NodeId, NodeKind, NodeRef, SyntaxTree};

use super::hover::formal_parameters;
use super::keywords::keywords_in_scope;
use super::scope::{ScopeAccess, completion_scope, should_complete, visible_variables};

/// Icon class of a completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Text,
    Function,
    Field,
    Variable,
    Class,
    Interface,
    Module,
    Property,
    Enum,
    Keyword,
    EnumMember,
    Constant,
    Event,
    TypeParameter,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Text => 1,
            CompletionKind::Function => 3,
            CompletionKind::Field => 5,
            CompletionKind::Variable => 6,
            CompletionKind::Class => 7,
            CompletionKind::Interface => 8,
            CompletionKind::Module => 9,
            CompletionKind::Property => 10,
            CompletionKind::Enum => 13,
            CompletionKind::Keyword => 14,
            CompletionKind::EnumMember => 20,
            CompletionKind::Constant => 21,
            CompletionKind::Event => 23,
            CompletionKind::TypeParameter => 25,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: SmolStr,
    pub kind: CompletionKind,
    /// Category shown next to the label (`event`, `port`, ...).
    pub detail: Option<SmolStr>,
    /// Parameter preview of events and functions, `(in a, out b)`.
    pub parameters: Option<String>,
    /// Range replaced on accept.
    pub replacement_range: Option<Span>,
}

impl CompletionItem {
    pub fn new(label: impl Into<SmolStr>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            parameters: None,
            replacement_range: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<SmolStr>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.parameters = Some(parameters.into());
        self
    }

    pub fn with_replacement_range(mut self, range: Option<Span>) -> Self {
        self.replacement_range = range;
        self
    }

    fn keyword(keyword: &str) -> Self {
        Self::new(keyword, CompletionKind::Keyword)
    }
}

/// Render `name`, declared by `declaration` in `tree`, as a completion item.
pub fn completion_item_for_declaration(
    tree: &SyntaxTree,
    name: &str,
    declaration: NodeId,
) -> CompletionItem {
    use NodeKind::*;

    let kind = tree.kind(declaration);
    let (icon, category) = match kind {
        Event { .. } => (CompletionKind::Event, Some("event")),
        EnumDefinition { .. } => (CompletionKind::Enum, Some("enum")),
        Port { .. } => (CompletionKind::Field, Some("port")),
        InterfaceDefinition { .. } => (CompletionKind::Interface, Some("interface")),
        Namespace { .. } => (CompletionKind::Module, Some("namespace")),
        ComponentDefinition { .. } => (CompletionKind::Class, Some("component")),
        ExternDeclaration { .. } => (CompletionKind::TypeParameter, Some("extern")),
        OnParameter { .. } => (CompletionKind::Variable, Some("parameter")),
        VariableDefinition { .. } => (CompletionKind::Variable, Some("var")),
        IntDefinition { .. } => (CompletionKind::Variable, Some("int")),
        FunctionDefinition { .. } => (CompletionKind::Function, Some("function")),
        Instance { .. } => (CompletionKind::Variable, None),
        Keyword { text } if text == "reply" => (CompletionKind::Property, Some(text.as_str())),
        Keyword { text } => (CompletionKind::Constant, Some(text.as_str())),
        Identifier { .. }
            if tree
                .parent(declaration)
                .is_some_and(|p| matches!(tree.kind(p), EnumDefinition { .. })) =>
        {
            (CompletionKind::EnumMember, None)
        }
        _ => (CompletionKind::Text, None),
    };

    let mut item = CompletionItem::new(name, icon);
    if let Some(category) = category {
        item = item.with_detail(category);
    }
    if let Event { parameters, .. } | FunctionDefinition { parameters, .. } = kind {
        let preview = formal_parameters(tree, parameters, false).join(", ");
        item = item.with_parameters(format!("({preview})"));
    }
    item
}

fn item_for(service: &dyn LanguageService, name: &str, declaration: NodeRef) -> CompletionItem {
    match service.syntax_tree(declaration.file) {
        Some(tree) => completion_item_for_declaration(&tree, name, declaration.node),
        None => CompletionItem::new(name, CompletionKind::Text),
    }
}

/// Get completion suggestions at a position.
///
/// Returns `None` when the position is outside the tree, names a declaration
/// being written, or is a member access whose owner does not resolve.
pub fn completions(
    service: &dyn LanguageService,
    tree: &SyntaxTree,
    position: Position,
) -> Option<Vec<CompletionItem>> {
    let leaf = service.leaf_at(tree, position)?;
    if !should_complete(tree, leaf) {
        debug!(leaf = tree.kind(leaf).name(), "declaration name, not completing");
        return None;
    }
    let scope = completion_scope(service, tree, leaf, position)?;

    let items: Vec<CompletionItem> = match &scope.access {
        ScopeAccess::Member(owner) => {
            let ty = service.type_of_symbol(owner);
            if ty.is_error() {
                debug!(owner = %owner.name, "owner type unresolved, suppressing completion");
                return None;
            }
            service
                .members_of(&ty)
                .into_iter()
                .map(|(name, member)| item_for(service, &name, member.declaration))
                .collect()
        }
        ScopeAccess::UnresolvedMember => {
            debug!("member access without owner, suppressing completion");
            return None;
        }
        ScopeAccess::Global => service
            .declared_variables_at(tree, tree.root())
            .into_iter()
            .map(|(name, declaration)| item_for(service, &name, declaration))
            .collect(),
        ScopeAccess::Local => visible_variables(service, tree, scope.scope)
            .into_iter()
            .map(|(name, declaration)| item_for(service, &name, declaration))
            .chain(
                keywords_in_scope(tree, scope.scope)
                    .into_iter()
                    .map(CompletionItem::keyword),
            )
            .collect(),
    };

    Some(
        items
            .into_iter()
            .map(|item| item.with_replacement_range(scope.replacement_range))
            .collect(),
    )
}
