//! Semantic layer consumed by the IDE queries.
//!
//! ## Key Types
//!
//! - [`LanguageService`] - the parser + type checker seen through the handful
//!   of queries the IDE layer needs
//! - [`Symbol`], [`Type`] - resolved identities and types
//! - [`FileCache`] - explicit get/put/invalidate store of parsed files
//! - [`Semantics`] - reference [`LanguageService`] over a [`FileCache`]
//!
//! ```text
//! syntax_tree(file)             <- FileCache
//!     │
//!     ▼
//! declared_variables_at(scope)  <- per scoped block, plus imports at file scope
//!     │
//!     ▼
//! symbol_of(node)               <- scope chain / member lookup
//!     │
//!     ▼
//! type_of_symbol / members_of
//! ```

mod cache;
mod semantics;
mod service;

pub use cache::FileCache;
pub use semantics::Semantics;
pub use service::{ErrorRecovery, LanguageService, Symbol, Type};
