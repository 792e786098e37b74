//! Go-to-definition tests for the IDE layer.

use std::fs;
use std::path::{Path, PathBuf};

use dzn_ide::base::Span;
use dzn_ide::ide::{AnalysisHost, DefinitionTarget};
use dzn_ide::project::AnalysisConfig;
use dzn_ide::syntax::{NodeKind, TreeBuilder};

use crate::helpers::fixtures::*;

fn target(line: u32, column: u32) -> Option<DefinitionTarget> {
    Some(DefinitionTarget {
        path: PathBuf::from(MAIN),
        position: pos(line, column),
    })
}

#[test]
fn test_goto_resolves_to_declaration_name() {
    let (host, lamp) = lamp(nothing);
    let analysis = host.analysis();

    // sw in `on sw.toggle`
    assert_eq!(analysis.goto_definition(lamp.file, pos(11, 8)), target(7, 19));
    // toggle in `on sw.toggle`
    assert_eq!(analysis.goto_definition(lamp.file, pos(11, 12)), target(2, 10));
    // lit in `mix(f, lit, q)`
    assert_eq!(analysis.goto_definition(lamp.file, pos(11, 44)), target(9, 9));
    // f in `mix(f, ...)` is the on-parameter
    assert_eq!(analysis.goto_definition(lamp.file, pos(11, 40)), target(11, 17));
    // ISwitch in `provides ISwitch sw;`
    assert_eq!(analysis.goto_definition(lamp.file, pos(7, 12)), target(0, 10));
}

#[test]
fn test_goto_on_unresolved_name_is_nothing() {
    let (host, lamp) = lamp(typing("nope"));
    assert_eq!(host.analysis().goto_definition(lamp.file, pos(12, 5)), None);
}

/// `import lib.dzn;` as the only statement of `<root>/sub/main.dzn`.
fn importing_host(root: &Path, config: AnalysisConfig) -> (AnalysisHost, dzn_ide::FileId) {
    let mut host = AnalysisHost::new(config);
    let main = root.join("sub").join("main.dzn");
    let file = host.file_id(&main);
    let mut b = TreeBuilder::new();
    let import = b.add(
        NodeKind::ImportStatement {
            file_name: "lib.dzn".into(),
        },
        Span::from_coords(0, 0, 0, 15),
    );
    host.set_file(b.finish(file, &main, vec![import], pos(1, 0)));
    (host, file)
}

fn imported(host: &AnalysisHost, file: dzn_ide::FileId) -> Option<PathBuf> {
    host.analysis()
        .goto_definition(file, pos(0, 8))
        .map(|target| {
            assert_eq!(target.position, pos(0, 0));
            target.path
        })
}

#[test]
fn test_import_prefers_root_then_file_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("lib.dzn"), "").unwrap();
    fs::write(root.join("sub").join("lib.dzn"), "").unwrap();

    let (host, file) = importing_host(root, AnalysisConfig::new(root));
    assert_eq!(imported(&host, file), Some(root.join("lib.dzn")));

    fs::remove_file(root.join("lib.dzn")).unwrap();
    assert_eq!(imported(&host, file), Some(root.join("sub").join("lib.dzn")));

    fs::remove_file(root.join("sub").join("lib.dzn")).unwrap();
    assert_eq!(imported(&host, file), None);
}

#[test]
fn test_import_searches_include_paths_before_file_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("sub")).unwrap();
    fs::create_dir(root.join("vendor")).unwrap();
    fs::write(root.join("vendor").join("lib.dzn"), "").unwrap();
    fs::write(root.join("sub").join("lib.dzn"), "").unwrap();

    let config = AnalysisConfig::new(root).with_include_path(root.join("vendor"));
    let (host, file) = importing_host(root, config);
    assert_eq!(imported(&host, file), Some(root.join("vendor").join("lib.dzn")));
}
