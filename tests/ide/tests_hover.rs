//! Hover tests for the IDE layer.

use std::path::Path;

use dzn_ide::base::Span;
use dzn_ide::ide::IdeError;
use dzn_ide::syntax::{NodeId, NodeKind, TreeBuilder};

use crate::helpers::fixtures::*;

fn signature_at(
    line_12: fn(&mut TreeBuilder) -> Vec<NodeId>,
    line: u32,
    column: u32,
) -> Option<String> {
    let (host, lamp) = lamp(line_12);
    host.analysis()
        .hover(lamp.file, pos(line, column))
        .unwrap()
        .map(|hover| hover.signature)
}

// =============================================================================
// DECLARATION SIGNATURES
// =============================================================================

#[test]
fn test_hover_port() {
    let (host, lamp) = lamp(nothing);
    let hover = host.analysis().hover(lamp.file, pos(11, 8)).unwrap().unwrap();

    assert_eq!(hover.signature, "provides ISwitch sw;");
    assert_eq!(hover.contents, "```dzn\nprovides ISwitch sw;\n```");
    assert_eq!(hover.span, Span::from_coords(11, 7, 11, 9));
}

#[test]
fn test_hover_event_is_qualified_by_interface() {
    assert_eq!(
        signature_at(nothing, 11, 12).as_deref(),
        Some("bool ISwitch.toggle(in bool force, out bool level, bool quiet);")
    );
}

#[test]
fn test_hover_event_without_parameters() {
    // Declaration name of `out void changed();`
    assert_eq!(
        signature_at(nothing, 3, 12).as_deref(),
        Some("void ISwitch.changed();")
    );
}

#[test]
fn test_hover_variable() {
    assert_eq!(signature_at(nothing, 11, 44).as_deref(), Some("bool lit;"));
}

#[test]
fn test_hover_function() {
    assert_eq!(
        signature_at(nothing, 11, 37).as_deref(),
        Some("bool mix(in bool a, in bool b, in bool c)")
    );
}

#[test]
fn test_hover_extern() {
    assert_eq!(
        signature_at(nothing, 15, 8).as_deref(),
        Some("extern Handle $void*$;")
    );
}

#[test]
fn test_hover_instance() {
    // 0: component Top {
    // 1:   system {
    // 2:     Lamp lamp;
    // 3:   }
    // 4: }
    // 5: component Lamp {}
    let mut host = host();
    let file = host.file_id(Path::new(MAIN));
    let mut b = TreeBuilder::new();

    let top_name = b.identifier("Top", pos(0, 10));
    let instance_type = b.type_ref("Lamp", pos(2, 4));
    let instance_name = b.identifier("lamp", pos(2, 9));
    let instance = b.add(
        NodeKind::Instance {
            type_ref: instance_type,
            name: instance_name,
        },
        Span::from_coords(2, 4, 2, 14),
    );
    let system = b.add(
        NodeKind::System {
            body: vec![instance],
        },
        Span::from_coords(1, 2, 3, 3),
    );
    let top = b.add(
        NodeKind::ComponentDefinition {
            name: top_name,
            ports: vec![],
            body: Some(system),
        },
        Span::from_coords(0, 0, 4, 1),
    );
    let lamp_name = b.identifier("Lamp", pos(5, 10));
    let lamp = b.add(
        NodeKind::ComponentDefinition {
            name: lamp_name,
            ports: vec![],
            body: None,
        },
        Span::from_coords(5, 0, 5, 17),
    );
    host.set_file(b.finish(file, MAIN, vec![top, lamp], pos(6, 0)));

    let hover = host.analysis().hover(file, pos(2, 10)).unwrap().unwrap();
    assert_eq!(hover.signature, "Lamp lamp;");
    assert_eq!(hover.span, Span::from_coords(2, 9, 2, 13));
}

// =============================================================================
// ON-PARAMETERS
// =============================================================================

#[test]
fn test_hover_on_parameter_uses_event_types() {
    assert_eq!(
        signature_at(nothing, 11, 17).as_deref(),
        Some("on sw.toggle(in bool force, out bool level, bool quiet <- lit):")
    );
}

#[test]
fn test_hover_on_parameter_falls_back_to_written_names() {
    // 12:     on nope.go(x <- lit): {}
    let (host, lamp) = lamp(|b: &mut TreeBuilder| {
        let name = b.name("nope.go", pos(12, 7));
        let x = b.identifier("x", pos(12, 15));
        let binding = b.identifier("lit", pos(12, 20));
        let param = b.wrap(NodeKind::OnParameter {
            name: x,
            assignment: Some(binding),
        });
        let list = b.add(
            NodeKind::OnParameterList {
                parameters: vec![param],
            },
            Span::from_coords(12, 14, 12, 24),
        );
        let trigger = b.wrap(NodeKind::OnTrigger {
            name,
            parameters: Some(list),
        });
        let body = b.add(
            NodeKind::Compound { statements: vec![] },
            Span::from_coords(12, 26, 12, 28),
        );
        vec![b.add(
            NodeKind::OnStatement {
                triggers: vec![trigger],
                body: Some(body),
            },
            Span::from_coords(12, 4, 12, 28),
        )]
    });

    let hover = host.analysis().hover(lamp.file, pos(12, 15)).unwrap().unwrap();
    assert_eq!(hover.signature, "on nope.go(x <- lit):");
}

#[test]
fn test_trigger_owner_is_not_its_own_parameter() {
    // 12:     on f.go(f): {}
    let (host, lamp) = lamp(|b: &mut TreeBuilder| {
        let name = b.name("f.go", pos(12, 7));
        let f = b.identifier("f", pos(12, 12));
        let param = b.wrap(NodeKind::OnParameter {
            name: f,
            assignment: None,
        });
        let list = b.add(
            NodeKind::OnParameterList {
                parameters: vec![param],
            },
            Span::from_coords(12, 11, 12, 14),
        );
        let trigger = b.wrap(NodeKind::OnTrigger {
            name,
            parameters: Some(list),
        });
        let body = b.add(
            NodeKind::Compound { statements: vec![] },
            Span::from_coords(12, 16, 12, 18),
        );
        vec![b.add(
            NodeKind::OnStatement {
                triggers: vec![trigger],
                body: Some(body),
            },
            Span::from_coords(12, 4, 12, 18),
        )]
    });
    let analysis = host.analysis();

    let hover = analysis.hover(lamp.file, pos(12, 12)).unwrap().unwrap();
    assert_eq!(hover.signature, "on f.go(f):");
    assert_eq!(analysis.hover(lamp.file, pos(12, 7)), Ok(None));
    assert_eq!(analysis.signature_help(lamp.file, pos(12, 13)), None);
}

#[test]
fn test_on_parameter_outside_trigger_is_an_error() {
    // 0: behavior {
    // 1:   on x: {}
    // 2: }
    let mut host = host();
    let file = host.file_id(Path::new(MAIN));
    let mut b = TreeBuilder::new();

    let x = b.identifier("x", pos(1, 5));
    let stray = b.wrap(NodeKind::OnParameter {
        name: x,
        assignment: None,
    });
    let on = b.add(
        NodeKind::OnStatement {
            triggers: vec![stray],
            body: None,
        },
        Span::from_coords(1, 2, 1, 10),
    );
    let behavior = b.add(
        NodeKind::Behavior {
            name: None,
            body: vec![on],
        },
        Span::from_coords(0, 0, 2, 1),
    );
    host.set_file(b.finish(file, MAIN, vec![behavior], pos(3, 0)));

    let result = host.analysis().hover(file, pos(1, 5));
    assert!(matches!(
        result,
        Err(IdeError::MissingEnclosing {
            expected: "OnTrigger",
            found: "OnParameter",
            ..
        })
    ));
}

// =============================================================================
// NO HOVER
// =============================================================================

#[test]
fn test_no_hover_for_enums_keywords_or_empty_space() {
    let (host, lamp) = lamp(nothing);
    let analysis = host.analysis();

    // `State` in `enum State { Off, On };`
    assert_eq!(analysis.hover(lamp.file, pos(1, 8)), Ok(None));
    // `provides` keyword
    assert_eq!(analysis.hover(lamp.file, pos(7, 3)), Ok(None));
    // outside the file
    assert_eq!(analysis.hover(lamp.file, pos(40, 0)), Ok(None));
}

#[test]
fn test_no_hover_for_unresolved_name() {
    let (host, lamp) = lamp(typing("nope"));
    assert_eq!(host.analysis().hover(lamp.file, pos(12, 5)), Ok(None));
}
