//! Analysis configuration

use std::path::{Path, PathBuf};

use tracing::debug;

/// Configuration shared by all queries of an [`AnalysisHost`](crate::ide::AnalysisHost).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Primary root for resolving `import` statements.
    pub workspace_root: PathBuf,
    /// Extra import roots, tried after the workspace root.
    pub include_paths: Vec<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            workspace_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            include_paths: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            include_paths: Vec::new(),
        }
    }

    /// Add an include path. Relative paths are taken relative to the workspace root.
    pub fn with_include_path(mut self, path: impl AsRef<Path>) -> Self {
        self.include_paths.push(self.workspace_root.join(path));
        self
    }

    /// Apply the editor's `includePaths` setting: a `;`-separated list of
    /// directories relative to the workspace root. Blank entries are ignored.
    pub fn with_include_paths_setting(mut self, setting: &str) -> Self {
        for entry in setting.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            self.include_paths.push(self.workspace_root.join(entry));
        }
        debug!(count = self.include_paths.len(), "include paths configured");
        self
    }

    /// Candidate roots for resolving an import written in `current_file`,
    /// in the order they are tried: the workspace root, the include paths,
    /// then the directory holding the file itself.
    pub fn import_roots(&self, current_file: &Path) -> Vec<PathBuf> {
        let mut roots = Vec::with_capacity(self.include_paths.len() + 2);
        roots.push(self.workspace_root.clone());
        roots.extend(self.include_paths.iter().cloned());
        if let Some(dir) = current_file.parent() {
            roots.push(dir.to_path_buf());
        }
        roots
    }
}
