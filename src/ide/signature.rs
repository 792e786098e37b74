//! Signature help for calls and on-triggers.

use text_size::{TextRange, TextSize};
use tracing::trace;

use crate::base::Position;
use crate::hir::LanguageService;
use crate::syntax::{NodeId, NodeKind, SyntaxTree};

use super::hover::formal_parameters;

/// One signature with the parameter under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureHelp {
    /// `name(dir T p, ...)`
    pub label: String,
    /// Byte range of each parameter inside `label`.
    pub parameters: Vec<TextRange>,
    /// Index of the parameter being typed.
    pub active_parameter: u32,
}

impl SignatureHelp {
    /// Text of parameter `index` as it appears in the label.
    pub fn parameter_label(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).map(|&range| &self.label[range])
    }
}

/// Signature help at `position`.
///
/// The innermost call whose span holds the cursor wins; outside any call an
/// enclosing on-trigger with a parameter list is used. The callee has to
/// resolve to a function or an event.
pub fn signature_help(
    service: &dyn LanguageService,
    tree: &SyntaxTree,
    position: Position,
) -> Option<SignatureHelp> {
    let leaf = service.leaf_at(tree, position)?;
    let (callee, arguments) = call_context(tree, leaf, position)?;

    let declaration = service.type_of_node(tree, callee).declaration()?;
    let decl_tree = service.syntax_tree(declaration.file)?;
    let (name, parameters) = match decl_tree.kind(declaration.node) {
        NodeKind::FunctionDefinition {
            name, parameters, ..
        }
        | NodeKind::Event {
            name, parameters, ..
        } => (*name, parameters),
        other => {
            trace!(callee = other.name(), "callee is not a function or event");
            return None;
        }
    };

    let mut label = format!("{}(", decl_tree.name_to_string(name));
    let mut ranges = Vec::with_capacity(parameters.len());
    let formal = formal_parameters(&decl_tree, parameters, true);
    for (index, parameter) in formal.iter().enumerate() {
        if index > 0 {
            label.push_str(", ");
        }
        let start = TextSize::of(label.as_str());
        label.push_str(parameter);
        ranges.push(TextRange::at(start, TextSize::of(parameter.as_str())));
    }
    label.push(')');

    let active_parameter = arguments
        .iter()
        .filter(|&&argument| tree.span(argument).ends_before(position))
        .count() as u32;

    Some(SignatureHelp {
        label,
        parameters: ranges,
        active_parameter,
    })
}

/// Callee and argument nodes of the call-like construct around `leaf`.
fn call_context(
    tree: &SyntaxTree,
    leaf: NodeId,
    position: Position,
) -> Option<(NodeId, &[NodeId])> {
    let enclosing = || std::iter::once(leaf).chain(tree.ancestors(leaf));

    enclosing()
        .find_map(|id| match tree.kind(id) {
            NodeKind::CallExpression { callee, arguments } if tree.span(id).contains(position) => {
                Some((*callee, arguments.as_slice()))
            }
            _ => None,
        })
        .or_else(|| {
            enclosing().find_map(|id| match tree.kind(id) {
                NodeKind::OnTrigger {
                    name,
                    parameters: Some(list),
                } => match tree.kind(*list) {
                    NodeKind::OnParameterList { parameters } => Some((*name, parameters.as_slice())),
                    _ => None,
                },
                _ => None,
            })
        })
}
