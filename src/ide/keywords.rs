//! Grammar keywords legal at a completion scope.

use crate::syntax::{NodeId, NodeKind, SyntaxTree};

const BEHAVIOR_KEYWORDS: &[&str] = &[
    "on", "if", "in", "out", "true", "false", "illegal", "void", "bool", "reply",
];
const COMPONENT_KEYWORDS: &[&str] = &["behavior", "system", "requires", "provides"];
const INTERFACE_KEYWORDS: &[&str] = &["behavior", "in", "out", "void", "bool", "reply"];
const TOP_LEVEL_KEYWORDS: &[&str] = &["namespace", "extern", "subint", "component", "interface"];

/// Keywords to offer at `scope`, always starting with `enum`.
///
/// The innermost structural context decides: behavior, then component, then
/// interface, then file or namespace level. Only one of these contributes.
pub fn keywords_in_scope(tree: &SyntaxTree, scope: NodeId) -> Vec<&'static str> {
    let within = |predicate: fn(&NodeKind) -> bool| tree.is_within(scope, predicate);

    let mut keywords = vec!["enum"];
    if within(|k| matches!(k, NodeKind::Behavior { .. })) {
        keywords.extend(BEHAVIOR_KEYWORDS);
        if within(|k| matches!(k, NodeKind::FunctionDefinition { .. })) {
            keywords.push("return");
        }
    } else if within(|k| matches!(k, NodeKind::ComponentDefinition { .. })) {
        keywords.extend(COMPONENT_KEYWORDS);
    } else if within(|k| matches!(k, NodeKind::InterfaceDefinition { .. })) {
        keywords.extend(INTERFACE_KEYWORDS);
    } else {
        if !within(|k| matches!(k, NodeKind::Namespace { .. })) {
            keywords.push("import");
        }
        keywords.extend(TOP_LEVEL_KEYWORDS);
    }
    keywords
}
