//! IDE features: high-level APIs for editor requests.
//!
//! This module sits between the semantic layer (HIR) and whatever editor
//! surface hosts it. Each query function corresponds to one editor request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: a tree, a position and a [`LanguageService`] in,
//!    a result out
//! 2. **No protocol types**: our own types, converted at the host boundary
//! 3. **Tolerant**: half-typed input is expected and never an error
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use dzn_ide::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::default();
//! host.set_file(tree);
//!
//! let analysis = host.analysis();
//! let items = analysis.completions(file_id, position);
//! ```
//!
//! [`LanguageService`]: crate::hir::LanguageService

mod analysis;
mod completion;
mod error;
mod goto;
mod hover;
mod keywords;
mod scope;
mod signature;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, CompletionKind, completion_item_for_declaration, completions};
pub use error::{IdeError, IdeResult};
pub use goto::{DefinitionTarget, goto_definition};
pub use hover::{HoverResult, hover};
pub use keywords::keywords_in_scope;
pub use scope::{CompletionScope, ScopeAccess, completion_scope, should_complete, visible_variables};
pub use signature::{SignatureHelp, signature_help};
