//! Go-to-definition implementation.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::base::Position;
use crate::hir::LanguageService;
use crate::project::AnalysisConfig;
use crate::syntax::{NodeKind, SyntaxTree};

/// A location to jump to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionTarget {
    pub path: PathBuf,
    pub position: Position,
}

/// Find the definition of whatever is under the cursor.
///
/// Inside an `import` statement the imported file is the target, tried
/// against each of [`AnalysisConfig::import_roots`] in order. Anywhere else
/// the resolved symbol's declaration name is the target.
pub fn goto_definition(
    service: &dyn LanguageService,
    tree: &SyntaxTree,
    position: Position,
    config: &AnalysisConfig,
) -> Option<DefinitionTarget> {
    let leaf = service.leaf_at(tree, position)?;

    let import = std::iter::once(leaf)
        .chain(tree.ancestors(leaf))
        .find(|&id| matches!(tree.kind(id), NodeKind::ImportStatement { .. }));
    if let Some(import) = import {
        let target = config.import_roots(tree.path()).iter().find_map(|root| {
            let target = service.resolve_import_target(tree, import, root);
            trace!(root = %root.display(), found = target.is_some(), "import resolution attempt");
            target
        });
        if target.is_none() {
            debug!(file = %tree.path().display(), "import target not found in any root");
        }
        return target.map(|path| DefinitionTarget {
            path,
            position: Position::default(),
        });
    }

    let symbol = service.symbol_of(tree, leaf)?;
    let decl_tree = service.syntax_tree(symbol.declaration.file)?;
    let declaration = symbol.declaration.node;
    let anchor = decl_tree
        .kind(declaration)
        .declaration_name()
        .unwrap_or(declaration);

    Some(DefinitionTarget {
        path: decl_tree.path().to_path_buf(),
        position: decl_tree.span(anchor).start,
    })
}
