//! Parsed-file cache.
//!
//! The one piece of shared state behind the queries. Trees are stored as
//! `Arc`s so a query can keep reading a snapshot while the host swaps in a
//! newer parse.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::base::FileId;
use crate::syntax::SyntaxTree;

#[derive(Debug, Default)]
struct CacheState {
    trees: FxHashMap<FileId, Arc<SyntaxTree>>,
    ids: FxHashMap<PathBuf, FileId>,
    next_id: u32,
}

/// Thread-safe store of parsed files with an explicit get/put/invalidate contract.
#[derive(Debug, Default)]
pub struct FileCache {
    state: RwLock<CacheState>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable id for `path`, allocating one on first sight.
    pub fn intern_path(&self, path: &Path) -> FileId {
        if let Some(&id) = self.state.read().ids.get(path) {
            return id;
        }
        let mut state = self.state.write();
        if let Some(&id) = state.ids.get(path) {
            return id;
        }
        let id = FileId::new(state.next_id);
        state.next_id += 1;
        state.ids.insert(path.to_path_buf(), id);
        id
    }

    /// Id of an already interned path.
    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.state.read().ids.get(path).copied()
    }

    pub fn get(&self, file: FileId) -> Option<Arc<SyntaxTree>> {
        self.state.read().trees.get(&file).cloned()
    }

    /// Cached tree for `path`, if it has been parsed.
    pub fn get_by_path(&self, path: &Path) -> Option<Arc<SyntaxTree>> {
        let state = self.state.read();
        let id = state.ids.get(path)?;
        state.trees.get(id).cloned()
    }

    /// Store a tree, replacing any previous parse of the same file.
    pub fn put(&self, tree: SyntaxTree) -> Arc<SyntaxTree> {
        let tree = Arc::new(tree);
        let mut state = self.state.write();
        state.ids.entry(tree.path().to_path_buf()).or_insert(tree.file());
        state.trees.insert(tree.file(), Arc::clone(&tree));
        debug!(file = tree.file().index(), path = %tree.path().display(), "cached syntax tree");
        tree
    }

    /// Drop the cached tree. Returns whether one was present.
    ///
    /// The file keeps its id so later parses of the same path line up.
    pub fn invalidate(&self, file: FileId) -> bool {
        let removed = self.state.write().trees.remove(&file).is_some();
        if removed {
            debug!(file = file.index(), "invalidated syntax tree");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.state.read().trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().trees.is_empty()
    }
}
