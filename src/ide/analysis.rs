//! AnalysisHost and Analysis: state management for IDE features.
//!
//! The `AnalysisHost` owns the parsed-file cache and the configuration, and
//! hands out `Analysis` snapshots for querying.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new(AnalysisConfig::new(workspace_root));
//!
//! let file = host.file_id(path);
//! host.set_file(parsed_tree);
//!
//! let analysis = host.analysis();
//! let items = analysis.completions(file, Position::new(4, 12));
//! let hover = analysis.hover(file, Position::new(4, 12))?;
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::base::{DZN_EXTENSION, FileId, Position};
use crate::hir::{FileCache, LanguageService, Semantics};
use crate::project::AnalysisConfig;
use crate::syntax::SyntaxTree;

use super::{
    CompletionItem, DefinitionTarget, HoverResult, IdeResult, SignatureHelp, completions,
    goto_definition, hover, signature_help,
};

/// Owns all state behind the IDE queries.
///
/// Apply changes via `set_file()` and `remove_file()`, then query through
/// `analysis()`.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    cache: FileCache,
    config: AnalysisConfig,
}

impl AnalysisHost {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            cache: FileCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }

    /// Stable id for `path`. Trees for this path must be built with it.
    pub fn file_id(&self, path: &Path) -> FileId {
        self.cache.intern_path(path)
    }

    /// Store a freshly parsed tree, replacing the previous one for its file.
    pub fn set_file(&mut self, tree: SyntaxTree) -> Arc<SyntaxTree> {
        if tree.path().extension().and_then(|e| e.to_str()) != Some(DZN_EXTENSION) {
            warn!(
                path = %tree.path().display(),
                "file does not have the .{} extension",
                DZN_EXTENSION
            );
        }
        self.cache.put(tree)
    }

    /// Forget the parse of `path`. Returns whether one was cached.
    pub fn remove_file(&mut self, path: &Path) -> bool {
        self.cache
            .file_id(path)
            .is_some_and(|file| self.cache.invalidate(file))
    }

    /// Number of cached files.
    pub fn file_count(&self) -> usize {
        self.cache.len()
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            semantics: Semantics::new(&self.cache, &self.config),
            config: &self.config,
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// Queries take `&self` and may run in parallel.
#[derive(Debug, Clone, Copy)]
pub struct Analysis<'a> {
    semantics: Semantics<'a>,
    config: &'a AnalysisConfig,
}

impl<'a> Analysis<'a> {
    /// The semantic service the queries run against.
    pub fn semantics(&self) -> &dyn LanguageService {
        &self.semantics
    }

    pub fn syntax_tree(&self, file: FileId) -> Option<Arc<SyntaxTree>> {
        self.semantics.syntax_tree(file)
    }

    /// Get completions at a position.
    pub fn completions(&self, file: FileId, position: Position) -> Option<Vec<CompletionItem>> {
        let tree = self.syntax_tree(file)?;
        completions(&self.semantics, &tree, position)
    }

    /// Get hover information at a position.
    pub fn hover(&self, file: FileId, position: Position) -> IdeResult<Option<HoverResult>> {
        match self.syntax_tree(file) {
            Some(tree) => hover(&self.semantics, &tree, position),
            None => Ok(None),
        }
    }

    /// Get signature help at a position.
    pub fn signature_help(&self, file: FileId, position: Position) -> Option<SignatureHelp> {
        let tree = self.syntax_tree(file)?;
        signature_help(&self.semantics, &tree, position)
    }

    /// Go to definition at a position.
    pub fn goto_definition(&self, file: FileId, position: Position) -> Option<DefinitionTarget> {
        let tree = self.syntax_tree(file)?;
        goto_definition(&self.semantics, &tree, position, self.config)
    }
}
