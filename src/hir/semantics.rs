//! Reference [`LanguageService`] over the parsed-file cache.
//!
//! Implements just enough of Dezyne's name resolution to drive the IDE
//! queries: scope-chain lookup within a file, member lookup through
//! interface/component/namespace/enum types, and one hop of `import`.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::{FileId, Position};
use crate::project::AnalysisConfig;
use crate::syntax::{NodeId, NodeKind, NodeRef, SyntaxTree};

use super::{ErrorRecovery, FileCache, LanguageService, Symbol, Type};

const BUILTIN_TYPES: [&str; 2] = ["bool", "void"];

/// Name resolution over the files held by a [`FileCache`].
#[derive(Debug, Clone, Copy)]
pub struct Semantics<'a> {
    cache: &'a FileCache,
    config: &'a AnalysisConfig,
}

impl<'a> Semantics<'a> {
    pub fn new(cache: &'a FileCache, config: &'a AnalysisConfig) -> Self {
        Self { cache, config }
    }

    /// Symbol for a declaration node, named after its name identifier.
    fn declaration_symbol(tree: &SyntaxTree, declaration: NodeId) -> Option<Symbol> {
        let name = tree.kind(declaration).declaration_name()?;
        let text = tree.text(name)?;
        Some(Symbol::new(text, tree.node_ref(declaration)))
    }

    /// Named declarations among `ids`. The first declaration of a name wins.
    fn named_declarations(tree: &SyntaxTree, ids: &[NodeId]) -> IndexMap<SmolStr, NodeRef> {
        let mut out = IndexMap::new();
        for &id in ids {
            let Some(name) = tree.kind(id).declaration_name() else {
                continue;
            };
            match tree.text(name) {
                Some(text) if !text.is_empty() => {
                    out.entry(SmolStr::new(text)).or_insert(tree.node_ref(id));
                }
                _ => {}
            }
        }
        out
    }

    /// Top-level declarations of files imported directly by `tree`.
    fn imported_declarations(&self, tree: &SyntaxTree, statements: &[NodeId]) -> IndexMap<SmolStr, NodeRef> {
        let mut out = IndexMap::new();
        for &statement in statements {
            if !matches!(tree.kind(statement), NodeKind::ImportStatement { .. }) {
                continue;
            }
            let imported = self
                .config
                .import_roots(tree.path())
                .iter()
                .find_map(|root| self.resolve_import_target(tree, statement, root))
                .and_then(|path| self.cache.get_by_path(&path));
            let Some(imported) = imported else {
                trace!(import = ?statement, "import not loaded");
                continue;
            };
            if let NodeKind::File { statements } = imported.kind(imported.root()) {
                for (name, declaration) in Self::named_declarations(&imported, statements) {
                    out.entry(name).or_insert(declaration);
                }
            }
        }
        out
    }

    /// Innermost-wins lookup of `name` starting at `scope`.
    ///
    /// With `types_only`, value declarations are skipped and the walk goes on
    /// to the enclosing scopes.
    fn lookup(
        &self,
        tree: &SyntaxTree,
        scope: NodeId,
        name: &str,
        types_only: bool,
    ) -> Option<Symbol> {
        tree.scope_chain(scope).find_map(|s| {
            self.declared_variables_at(tree, s)
                .get(name)
                .filter(|&&declaration| !types_only || self.declares_type(tree, declaration))
                .map(|&declaration| Symbol::new(name, declaration))
        })
    }

    fn declares_type(&self, tree: &SyntaxTree, declaration: NodeRef) -> bool {
        if declaration.file == tree.file() {
            return tree.kind(declaration.node).declares_type();
        }
        self.cache
            .get(declaration.file)
            .is_some_and(|decl_tree| decl_tree.kind(declaration.node).declares_type())
    }

    /// Whether `id` is part of a type reference, possibly as the head of a
    /// dotted type name.
    fn in_type_position(tree: &SyntaxTree, id: NodeId) -> bool {
        tree.ancestors(id)
            .find(|&a| !matches!(tree.kind(a), NodeKind::CompoundName { .. }))
            .is_some_and(|a| matches!(tree.kind(a), NodeKind::TypeReference { .. }))
    }

    /// Scope a reference at `id` is looked up from.
    ///
    /// An on-statement declares its parameters for the body and the
    /// bindings only; the trigger name itself is resolved outside it.
    fn reference_scope(tree: &SyntaxTree, id: NodeId) -> NodeId {
        let scope = tree.scope_of(id);
        let in_trigger_name = tree
            .ancestors(id)
            .take_while(|&a| a != scope)
            .map(|a| tree.kind(a))
            .find(|k| matches!(k, NodeKind::OnTrigger { .. } | NodeKind::OnParameterList { .. }))
            .is_some_and(|k| matches!(k, NodeKind::OnTrigger { .. }));
        if in_trigger_name {
            tree.scope_of(scope)
        } else {
            scope
        }
    }

    fn member_of(&self, owner: &Symbol, name: &str) -> Option<Symbol> {
        let ty = self.type_of_symbol(owner);
        self.members_of(&ty).get(name).cloned()
    }

    fn resolve_identifier(&self, tree: &SyntaxTree, id: NodeId, text: &str) -> Option<Symbol> {
        if let Some(parent) = tree.parent(id) {
            let parent_kind = tree.kind(parent);
            if parent_kind.declaration_name() == Some(id) {
                return Self::declaration_symbol(tree, parent);
            }
            match parent_kind {
                NodeKind::EnumDefinition { members, .. } if members.contains(&id) => {
                    return Some(Symbol::new(text, tree.node_ref(id)));
                }
                NodeKind::CompoundName {
                    compound,
                    name: Some(tail),
                }
                | NodeKind::CompoundBindingExpression {
                    compound,
                    name: Some(tail),
                } if *tail == id => {
                    return match compound {
                        Some(left) => {
                            let owner = self.symbol_of(tree, *left)?;
                            self.member_of(&owner, text)
                        }
                        None => {
                            let types_only = Self::in_type_position(tree, id);
                            self.lookup(tree, tree.root(), text, types_only)
                        }
                    };
                }
                _ => {}
            }
        }
        let types_only = Self::in_type_position(tree, id);
        self.lookup(tree, Self::reference_scope(tree, id), text, types_only)
    }

    /// Type of an on-trigger parameter: the type of the event parameter at
    /// the same position.
    fn on_parameter_type(&self, tree: &SyntaxTree, parameter: NodeId) -> Option<Type> {
        let trigger = tree.find_first_parent(parameter, |k| matches!(k, NodeKind::OnTrigger { .. }))?;
        let NodeKind::OnTrigger {
            name,
            parameters: Some(list),
        } = tree.kind(trigger)
        else {
            return None;
        };
        let NodeKind::OnParameterList { parameters } = tree.kind(*list) else {
            return None;
        };
        let index = parameters.iter().position(|&p| p == parameter)?;

        let event = self.type_of_node(tree, *name).declaration()?;
        let event_tree = self.cache.get(event.file)?;
        let NodeKind::Event { parameters, .. } = event_tree.kind(event.node) else {
            return None;
        };
        let NodeKind::EventParameter { type_ref, .. } = event_tree.kind(*parameters.get(index)?) else {
            return None;
        };
        Some(self.type_of_node(&event_tree, *type_ref))
    }

    /// Return type of whatever `callee` resolves to.
    fn call_result_type(&self, tree: &SyntaxTree, callee: NodeId) -> Option<Type> {
        let declaration = self.type_of_node(tree, callee).declaration()?;
        let decl_tree = self.cache.get(declaration.file)?;
        let result = match decl_tree.kind(declaration.node) {
            NodeKind::Event { type_ref, .. } => *type_ref,
            NodeKind::FunctionDefinition { return_type, .. } => *return_type,
            _ => return None,
        };
        Some(self.type_of_node(&decl_tree, result))
    }
}

impl LanguageService for Semantics<'_> {
    fn syntax_tree(&self, file: FileId) -> Option<Arc<SyntaxTree>> {
        self.cache.get(file)
    }

    fn symbol_of(&self, tree: &SyntaxTree, node: NodeId) -> Option<Symbol> {
        match tree.kind(node) {
            NodeKind::Identifier { text } => self.resolve_identifier(tree, node, text),
            NodeKind::CompoundName { name, .. } | NodeKind::CompoundBindingExpression { name, .. } => {
                name.and_then(|tail| self.symbol_of(tree, tail))
            }
            NodeKind::TypeReference { type_name } => self.symbol_of(tree, *type_name),
            kind if kind.declaration_name().is_some() => Self::declaration_symbol(tree, node),
            _ => None,
        }
    }

    fn type_of_symbol(&self, symbol: &Symbol) -> Type {
        let Some(tree) = self.cache.get(symbol.declaration.file) else {
            return Type::Error;
        };
        let declaration = symbol.declaration.node;
        match tree.kind(declaration) {
            NodeKind::Port { type_ref, .. }
            | NodeKind::Instance { type_ref, .. }
            | NodeKind::VariableDefinition { type_ref, .. }
            | NodeKind::FunctionParameter { type_ref, .. }
            | NodeKind::EventParameter { type_ref, .. } => self.type_of_node(&tree, *type_ref),
            NodeKind::OnParameter { .. } => self
                .on_parameter_type(&tree, declaration)
                .unwrap_or(Type::Error),
            NodeKind::InterfaceDefinition { .. }
            | NodeKind::ComponentDefinition { .. }
            | NodeKind::Namespace { .. }
            | NodeKind::EnumDefinition { .. }
            | NodeKind::IntDefinition { .. }
            | NodeKind::ExternDeclaration { .. }
            | NodeKind::Event { .. }
            | NodeKind::FunctionDefinition { .. } => Type::Declared(symbol.declaration),
            NodeKind::Identifier { .. } => match tree.parent(declaration) {
                Some(parent) if matches!(tree.kind(parent), NodeKind::EnumDefinition { .. }) => {
                    Type::Declared(tree.node_ref(parent))
                }
                _ => Type::Error,
            },
            _ => Type::Error,
        }
    }

    fn type_of_node(&self, tree: &SyntaxTree, node: NodeId) -> Type {
        match tree.kind(node) {
            NodeKind::TypeReference { type_name } => self.type_of_node(tree, *type_name),
            NodeKind::Identifier { text } if BUILTIN_TYPES.contains(&text.as_str()) => {
                Type::Builtin(text.clone())
            }
            NodeKind::Identifier { .. }
            | NodeKind::CompoundName { .. }
            | NodeKind::CompoundBindingExpression { .. } => self
                .symbol_of(tree, node)
                .map_or(Type::Error, |symbol| self.type_of_symbol(&symbol)),
            NodeKind::Keyword { text } if text == "true" || text == "false" => {
                Type::Builtin(SmolStr::new_static("bool"))
            }
            NodeKind::Literal { text } if text.parse::<i64>().is_ok() => {
                Type::Builtin(SmolStr::new_static("int"))
            }
            NodeKind::CallExpression { callee, .. } => self
                .call_result_type(tree, *callee)
                .unwrap_or(Type::Error),
            _ => Type::Error,
        }
    }

    fn members_of(&self, ty: &Type) -> IndexMap<SmolStr, Symbol> {
        let Some(declaration) = ty.declaration() else {
            return IndexMap::new();
        };
        let Some(tree) = self.cache.get(declaration.file) else {
            return IndexMap::new();
        };
        let named = match tree.kind(declaration.node) {
            NodeKind::InterfaceDefinition { body, .. } | NodeKind::Namespace { body, .. } => {
                Self::named_declarations(&tree, body)
            }
            NodeKind::ComponentDefinition { ports, .. } => Self::named_declarations(&tree, ports),
            NodeKind::EnumDefinition { members, .. } => members
                .iter()
                .filter_map(|&m| Some((SmolStr::new(tree.text(m)?), tree.node_ref(m))))
                .collect(),
            _ => IndexMap::new(),
        };
        named
            .into_iter()
            .map(|(name, declaration)| {
                let symbol = Symbol::new(name.clone(), declaration);
                (name, symbol)
            })
            .collect()
    }

    fn declared_variables_at(&self, tree: &SyntaxTree, scope: NodeId) -> IndexMap<SmolStr, NodeRef> {
        match tree.kind(scope) {
            NodeKind::File { statements } => {
                let mut declared = Self::named_declarations(tree, statements);
                for (name, declaration) in self.imported_declarations(tree, statements) {
                    declared.entry(name).or_insert(declaration);
                }
                declared
            }
            NodeKind::Namespace { body, .. }
            | NodeKind::InterfaceDefinition { body, .. }
            | NodeKind::Behavior { body, .. } => Self::named_declarations(tree, body),
            NodeKind::ComponentDefinition { ports, body, .. } => {
                let mut declared = Self::named_declarations(tree, ports);
                if let Some(NodeKind::System { body: instances }) = body.map(|b| tree.kind(b)) {
                    for (name, declaration) in Self::named_declarations(tree, instances) {
                        declared.entry(name).or_insert(declaration);
                    }
                }
                declared
            }
            NodeKind::FunctionDefinition { parameters, .. } => {
                Self::named_declarations(tree, parameters)
            }
            NodeKind::OnStatement { triggers, .. } => {
                let mut declared = IndexMap::new();
                for &trigger in triggers {
                    let NodeKind::OnTrigger {
                        parameters: Some(list),
                        ..
                    } = tree.kind(trigger)
                    else {
                        continue;
                    };
                    if let NodeKind::OnParameterList { parameters } = tree.kind(*list) {
                        for (name, declaration) in Self::named_declarations(tree, parameters) {
                            declared.entry(name).or_insert(declaration);
                        }
                    }
                }
                declared
            }
            NodeKind::Compound { statements } => Self::named_declarations(tree, statements),
            _ => IndexMap::new(),
        }
    }

    fn find_name_and_owner_in_error_node(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        position: Position,
    ) -> Option<ErrorRecovery> {
        let fragment = tree
            .descendants(node)
            .into_iter()
            .filter(|&id| {
                matches!(
                    tree.kind(id),
                    NodeKind::Identifier { .. }
                        | NodeKind::CompoundName { .. }
                        | NodeKind::CompoundBindingExpression { .. }
                )
            })
            .filter(|&id| {
                let span = tree.span(id);
                span.end.line == position.line && span.end <= position
            })
            .max_by_key(|&id| {
                let span = tree.span(id);
                (span.end, Reverse(span.start))
            });
        let Some(fragment) = fragment else {
            debug!(node = ?node, "no name fragment before cursor in error node");
            return None;
        };

        let owner_node = match tree.kind(fragment) {
            NodeKind::CompoundName { compound, .. }
            | NodeKind::CompoundBindingExpression { compound, .. } => *compound,
            _ => match tree.parent(fragment).map(|p| tree.kind(p)) {
                Some(
                    NodeKind::CompoundName {
                        compound,
                        name: Some(tail),
                    }
                    | NodeKind::CompoundBindingExpression {
                        compound,
                        name: Some(tail),
                    },
                ) if *tail == fragment => *compound,
                _ => None,
            },
        };
        let owning_object = owner_node.and_then(|owner| self.symbol_of(tree, owner));
        trace!(fragment = ?fragment, owner = ?owning_object, "recovered name in error node");

        Some(ErrorRecovery {
            scope: tree.scope_of(node),
            owning_object,
        })
    }

    fn resolve_import_target(&self, tree: &SyntaxTree, import: NodeId, root: &Path) -> Option<PathBuf> {
        let NodeKind::ImportStatement { file_name } = tree.kind(import) else {
            return None;
        };
        let candidate = root.join(file_name.as_str());
        (self.cache.get_by_path(&candidate).is_some() || candidate.exists()).then_some(candidate)
    }
}
