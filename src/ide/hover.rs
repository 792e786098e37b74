//! Hover information implementation.

use tracing::trace;

use crate::base::{Position, Span};
use crate::hir::LanguageService;
use crate::syntax::{NodeId, NodeKind, SyntaxTree};

use super::error::{IdeError, IdeResult};

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// One-line signature of the hovered declaration.
    pub signature: String,
    /// The signature as a fenced `dzn` markdown block.
    pub contents: String,
    /// Span of the hovered identifier.
    pub span: Span,
}

impl HoverResult {
    pub fn new(signature: String, span: Span) -> Self {
        let contents = format!("```dzn\n{signature}\n```");
        Self {
            signature,
            contents,
            span,
        }
    }
}

/// Get hover information for a position.
///
/// Only identifiers that resolve to a function, event, port, on-parameter,
/// variable, extern or instance produce a result.
pub fn hover(
    service: &dyn LanguageService,
    tree: &SyntaxTree,
    position: Position,
) -> IdeResult<Option<HoverResult>> {
    let Some(leaf) = service.leaf_at(tree, position) else {
        return Ok(None);
    };
    if !matches!(tree.kind(leaf), NodeKind::Identifier { .. }) {
        return Ok(None);
    }
    let Some(symbol) = service.symbol_of(tree, leaf) else {
        trace!(leaf = ?leaf, "hovered identifier does not resolve");
        return Ok(None);
    };
    let Some(decl_tree) = service.syntax_tree(symbol.declaration.file) else {
        return Ok(None);
    };
    let declaration = symbol.declaration.node;
    if matches!(decl_tree.kind(declaration), NodeKind::Keyword { .. }) {
        return Ok(None);
    }

    Ok(signature_of(service, &decl_tree, declaration)?
        .map(|signature| HoverResult::new(signature, tree.span(leaf))))
}

/// Render a declaration the way it is written in source.
fn signature_of(
    service: &dyn LanguageService,
    tree: &SyntaxTree,
    declaration: NodeId,
) -> IdeResult<Option<String>> {
    let name = |id: NodeId| tree.name_to_string(id);

    let signature = match tree.kind(declaration) {
        NodeKind::FunctionDefinition {
            return_type,
            name: fname,
            parameters,
            ..
        } => format!(
            "{} {}({})",
            name(*return_type),
            name(*fname),
            formal_parameters(tree, parameters, true).join(", ")
        ),
        NodeKind::Event {
            type_ref,
            name: ename,
            parameters,
            ..
        } => {
            let interface = match tree.parent(declaration).map(|p| tree.kind(p)) {
                Some(NodeKind::InterfaceDefinition { name: iname, .. }) => {
                    format!("{}.", name(*iname))
                }
                _ => String::new(),
            };
            format!(
                "{} {interface}{}({});",
                name(*type_ref),
                name(*ename),
                formal_parameters(tree, parameters, true).join(", ")
            )
        }
        NodeKind::Port {
            direction,
            type_ref,
            name: pname,
        } => format!("{} {} {};", name(*direction), name(*type_ref), name(*pname)),
        NodeKind::OnParameter { .. } => return on_parameter_signature(service, tree, declaration).map(Some),
        NodeKind::VariableDefinition {
            type_ref,
            name: vname,
            ..
        }
        | NodeKind::Instance {
            type_ref,
            name: vname,
        } => format!("{} {};", name(*type_ref), name(*vname)),
        NodeKind::ExternDeclaration { name: xname, value } => {
            format!("extern {} ${value}$;", name(*xname))
        }
        _ => return Ok(None),
    };
    Ok(Some(signature))
}

/// `dir T p` for each formal parameter, or `dir p` without `with_type`.
/// The direction is optional.
pub(super) fn formal_parameters(
    tree: &SyntaxTree,
    parameters: &[NodeId],
    with_type: bool,
) -> Vec<String> {
    parameters
        .iter()
        .filter_map(|&p| match tree.kind(p) {
            NodeKind::EventParameter {
                direction,
                type_ref,
                name,
            }
            | NodeKind::FunctionParameter {
                direction,
                type_ref,
                name,
            } => {
                let name = tree.name_to_string(*name);
                let declared = if with_type {
                    format!("{} {name}", tree.name_to_string(*type_ref))
                } else {
                    name
                };
                Some(match direction.and_then(|d| tree.text(d)) {
                    Some(direction) => format!("{direction} {declared}"),
                    None => declared,
                })
            }
            _ => None,
        })
        .collect()
}

/// `on port.event(...):`, typed from the event declaration when it resolves.
fn on_parameter_signature(
    service: &dyn LanguageService,
    tree: &SyntaxTree,
    parameter: NodeId,
) -> IdeResult<String> {
    let (trigger_name, list) = tree
        .ancestors(parameter)
        .find_map(|ancestor| match tree.kind(ancestor) {
            NodeKind::OnTrigger { name, parameters } => Some((*name, *parameters)),
            _ => None,
        })
        .ok_or_else(|| {
            IdeError::missing_enclosing("OnTrigger", tree.kind(parameter).name(), tree.span(parameter))
        })?;

    let written: &[NodeId] = match list.map(|list| tree.kind(list)) {
        Some(NodeKind::OnParameterList { parameters }) => parameters,
        _ => &[],
    };
    let written: Vec<(NodeId, Option<NodeId>)> = written
        .iter()
        .filter_map(|&p| match tree.kind(p) {
            NodeKind::OnParameter { name, assignment } => Some((*name, *assignment)),
            _ => None,
        })
        .collect();

    let declared = service
        .type_of_node(tree, trigger_name)
        .declaration()
        .and_then(|event| {
            let event_tree = service.syntax_tree(event.file)?;
            match event_tree.kind(event.node) {
                NodeKind::Event { parameters, .. } => {
                    Some(formal_parameters(&event_tree, parameters, true))
                }
                _ => None,
            }
        });

    let rendered: Vec<String> = match declared {
        Some(typed) => typed
            .into_iter()
            .enumerate()
            .map(|(i, typed)| match written.get(i).and_then(|&(_, binding)| binding) {
                Some(binding) => format!("{typed} <- {}", tree.name_to_string(binding)),
                None => typed,
            })
            .collect(),
        None => written
            .iter()
            .map(|&(name, binding)| match binding {
                Some(binding) => format!(
                    "{} <- {}",
                    tree.name_to_string(name),
                    tree.name_to_string(binding)
                ),
                None => tree.name_to_string(name),
            })
            .collect(),
    };

    Ok(format!(
        "on {}({}):",
        tree.name_to_string(trigger_name),
        rendered.join(", ")
    ))
}
