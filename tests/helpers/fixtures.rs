//! Dezyne source fixtures, materialized as syntax trees.

use std::path::Path;

use dzn_ide::base::{FileId, Position, Span};
use dzn_ide::ide::{AnalysisHost, CompletionItem};
use dzn_ide::project::AnalysisConfig;
use dzn_ide::syntax::{NodeId, NodeKind, TreeBuilder};

pub const WORKSPACE: &str = "/ws";
pub const MAIN: &str = "/ws/main.dzn";

pub fn pos(line: u32, column: u32) -> Position {
    Position::new(line, column)
}

pub fn host() -> AnalysisHost {
    AnalysisHost::new(AnalysisConfig::new(WORKSPACE))
}

pub fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| item.label.as_str()).collect()
}

/// `(direction, type, name)` of a formal parameter.
pub type Param<'a> = (Option<&'a str>, &'a str, &'a str);

fn len(text: &str) -> u32 {
    text.chars().count() as u32
}

/// Formal parameters laid out as `dir T p, dir T p` from `column`.
/// Returns the parameter nodes and the column right after the last one.
pub fn parameters(
    b: &mut TreeBuilder,
    line: u32,
    mut column: u32,
    params: &[Param<'_>],
    event: bool,
) -> (Vec<NodeId>, u32) {
    let mut ids = Vec::new();
    for (index, &(direction, type_name, name)) in params.iter().enumerate() {
        if index > 0 {
            column += 2;
        }
        let direction = direction.map(|d| {
            let keyword = b.keyword(d, pos(line, column));
            column += len(d) + 1;
            keyword
        });
        let type_ref = b.type_ref(type_name, pos(line, column));
        column += len(type_name) + 1;
        let name_len = len(name);
        let name = b.identifier(name, pos(line, column));
        column += name_len;
        let kind = if event {
            NodeKind::EventParameter {
                direction,
                type_ref,
                name,
            }
        } else {
            NodeKind::FunctionParameter {
                direction,
                type_ref,
                name,
            }
        };
        ids.push(b.wrap(kind));
    }
    (ids, column)
}

/// `dir T name(params);` on one line starting at `column`.
pub fn event(
    b: &mut TreeBuilder,
    line: u32,
    column: u32,
    direction: &str,
    type_name: &str,
    name: &str,
    params: &[Param<'_>],
) -> NodeId {
    let start = column;
    let direction_kw = b.keyword(direction, pos(line, column));
    let mut column = column + len(direction) + 1;
    let type_ref = b.type_ref(type_name, pos(line, column));
    column += len(type_name) + 1;
    let name_id = b.identifier(name, pos(line, column));
    column += len(name) + 1;
    let (param_ids, end) = parameters(b, line, column, params, true);
    b.add(
        NodeKind::Event {
            direction: direction_kw,
            type_ref,
            name: name_id,
            parameters: param_ids,
        },
        Span::from_coords(line, start, line, end + 2),
    )
}

/// Node ids of the [`lamp`] fixture.
#[derive(Debug, Clone, Copy)]
pub struct Lamp {
    pub file: FileId,
    pub port: NodeId,
    pub lit: NodeId,
}

/// ```text
///  0: interface ISwitch {
///  1:   enum State { Off, On };
///  2:   in bool toggle(in bool force, out bool level, bool quiet);
///  3:   out void changed();
///  4:   behavior {}
///  5: }
///  6: component Lamp {
///  7:   provides ISwitch sw;
///  8:   behavior {
///  9:     bool lit = false;
/// 10:     bool mix(in bool a, in bool b, in bool c) { return a; }
/// 11:     on sw.toggle(f, l, q <- lit): { mix(f, lit, q); }
/// 12:     <whatever `line_12` builds>
/// 13:   }
/// 14: }
/// 15: extern Handle $void*$;
/// ```
///
/// `line_12` adds the statements a test is typing, all on line 12 of the
/// behavior body.
pub fn lamp(line_12: impl FnOnce(&mut TreeBuilder) -> Vec<NodeId>) -> (AnalysisHost, Lamp) {
    let mut host = host();
    let file = host.file_id(Path::new(MAIN));
    let mut b = TreeBuilder::new();

    // interface ISwitch
    let iface_name = b.identifier("ISwitch", pos(0, 10));
    let enum_name = b.identifier("State", pos(1, 7));
    let off = b.identifier("Off", pos(1, 15));
    let on_value = b.identifier("On", pos(1, 20));
    let state_enum = b.add(
        NodeKind::EnumDefinition {
            name: enum_name,
            members: vec![off, on_value],
        },
        Span::from_coords(1, 2, 1, 25),
    );
    let toggle = event(
        &mut b,
        2,
        2,
        "in",
        "bool",
        "toggle",
        &[
            (Some("in"), "bool", "force"),
            (Some("out"), "bool", "level"),
            (None, "bool", "quiet"),
        ],
    );
    let changed = event(&mut b, 3, 2, "out", "void", "changed", &[]);
    let iface_behavior = b.add(
        NodeKind::Behavior {
            name: None,
            body: vec![],
        },
        Span::from_coords(4, 2, 4, 13),
    );
    let interface = b.add(
        NodeKind::InterfaceDefinition {
            name: iface_name,
            body: vec![state_enum, toggle, changed],
            behavior: Some(iface_behavior),
        },
        Span::from_coords(0, 0, 5, 1),
    );

    // component Lamp
    let comp_name = b.identifier("Lamp", pos(6, 10));
    let provides = b.keyword("provides", pos(7, 2));
    let port_type = b.type_ref("ISwitch", pos(7, 11));
    let port_name = b.identifier("sw", pos(7, 19));
    let port = b.add(
        NodeKind::Port {
            direction: provides,
            type_ref: port_type,
            name: port_name,
        },
        Span::from_coords(7, 2, 7, 22),
    );

    let lit_type = b.type_ref("bool", pos(9, 4));
    let lit_name = b.identifier("lit", pos(9, 9));
    let lit_init = b.keyword("false", pos(9, 15));
    let lit = b.add(
        NodeKind::VariableDefinition {
            type_ref: lit_type,
            name: lit_name,
            initializer: Some(lit_init),
        },
        Span::from_coords(9, 4, 9, 21),
    );

    let mix_type = b.type_ref("bool", pos(10, 4));
    let mix_name = b.identifier("mix", pos(10, 9));
    let (mix_params, _) = parameters(
        &mut b,
        10,
        13,
        &[
            (Some("in"), "bool", "a"),
            (Some("in"), "bool", "b"),
            (Some("in"), "bool", "c"),
        ],
        false,
    );
    let returned = b.identifier("a", pos(10, 55));
    let ret = b.add(
        NodeKind::ReturnStatement {
            value: Some(returned),
        },
        Span::from_coords(10, 48, 10, 57),
    );
    let mix_body = b.add(
        NodeKind::Compound {
            statements: vec![ret],
        },
        Span::from_coords(10, 46, 10, 59),
    );
    let mix = b.add(
        NodeKind::FunctionDefinition {
            return_type: mix_type,
            name: mix_name,
            parameters: mix_params,
            body: Some(mix_body),
        },
        Span::from_coords(10, 4, 10, 59),
    );

    let trigger_name = b.name("sw.toggle", pos(11, 7));
    let f = b.identifier("f", pos(11, 17));
    let f_param = b.wrap(NodeKind::OnParameter {
        name: f,
        assignment: None,
    });
    let l = b.identifier("l", pos(11, 20));
    let l_param = b.wrap(NodeKind::OnParameter {
        name: l,
        assignment: None,
    });
    let q = b.identifier("q", pos(11, 23));
    let q_binding = b.identifier("lit", pos(11, 28));
    let q_param = b.wrap(NodeKind::OnParameter {
        name: q,
        assignment: Some(q_binding),
    });
    let list = b.add(
        NodeKind::OnParameterList {
            parameters: vec![f_param, l_param, q_param],
        },
        Span::from_coords(11, 16, 11, 32),
    );
    let trigger = b.wrap(NodeKind::OnTrigger {
        name: trigger_name,
        parameters: Some(list),
    });
    let callee = b.identifier("mix", pos(11, 36));
    let arg_f = b.identifier("f", pos(11, 40));
    let arg_lit = b.identifier("lit", pos(11, 43));
    let arg_q = b.identifier("q", pos(11, 48));
    let call = b.add(
        NodeKind::CallExpression {
            callee,
            arguments: vec![arg_f, arg_lit, arg_q],
        },
        Span::from_coords(11, 36, 11, 50),
    );
    let call_statement = b.wrap(NodeKind::ExpressionStatement { expression: call });
    let on_body = b.add(
        NodeKind::Compound {
            statements: vec![call_statement],
        },
        Span::from_coords(11, 34, 11, 53),
    );
    let on = b.add(
        NodeKind::OnStatement {
            triggers: vec![trigger],
            body: Some(on_body),
        },
        Span::from_coords(11, 4, 11, 53),
    );

    let mut body = vec![lit, mix, on];
    body.extend(line_12(&mut b));
    let behavior = b.add(
        NodeKind::Behavior { name: None, body },
        Span::from_coords(8, 2, 13, 3),
    );
    let component = b.add(
        NodeKind::ComponentDefinition {
            name: comp_name,
            ports: vec![port],
            body: Some(behavior),
        },
        Span::from_coords(6, 0, 14, 1),
    );

    let handle_name = b.identifier("Handle", pos(15, 7));
    let handle = b.add(
        NodeKind::ExternDeclaration {
            name: handle_name,
            value: "void*".into(),
        },
        Span::from_coords(15, 0, 15, 22),
    );

    let tree = b.finish(file, MAIN, vec![interface, component, handle], pos(16, 0));
    host.set_file(tree);

    let ids = Lamp { file, port, lit };
    (host, ids)
}

/// `expression;` around `expression`.
pub fn statement(b: &mut TreeBuilder, expression: NodeId) -> NodeId {
    b.wrap(NodeKind::ExpressionStatement { expression })
}

/// A line-12 statement consisting of the (possibly dotted) name `text`.
pub fn typing(text: &'static str) -> impl FnOnce(&mut TreeBuilder) -> Vec<NodeId> {
    move |b| {
        let name = b.name(text, pos(12, 4));
        vec![statement(b, name)]
    }
}

/// Nothing on line 12.
pub fn nothing(_: &mut TreeBuilder) -> Vec<NodeId> {
    Vec::new()
}
