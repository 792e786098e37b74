//! # dzn-ide-base
//!
//! Semantic-query core of an IDE for the Dezyne modelling language: turns a
//! cursor position in a possibly malformed `.dzn` file into completions,
//! hovers, signature help and definition targets.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (completion, hover, signature help, goto-def)
//!   ↓
//! hir       → Language service seam, reference semantics, file cache
//!   ↓
//! project   → Import roots and include paths
//!   ↓
//! syntax    → Arena syntax tree, NodeKind, TreeBuilder
//!   ↓
//! base      → Primitives (FileId, Position, Span)
//! ```
//!
//! Parsing is not part of this crate: a parser materializes its output with
//! [`syntax::TreeBuilder`] and hands the tree to [`ide::AnalysisHost`].

// ============================================================================
// MODULES (dependency order: base → syntax → project → hir → ide)
// ============================================================================

/// Foundation types: FileId, Position, Span
pub mod base;

/// Syntax: arena tree, node kinds, tree builder
pub mod syntax;

/// Project settings: import roots
pub mod project;

/// Semantic layer: LanguageService, Symbol, Type, FileCache
pub mod hir;

/// IDE features: completion, hover, signature help, goto-definition
pub mod ide;

// Re-export foundation types
pub use base::{FileId, Position, Span};
