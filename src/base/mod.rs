//! Foundation types for the dzn IDE core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`Position`], [`Span`] - Line/column positions for syntax nodes
//! - [`DZN_EXTENSION`] - The source file extension
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod position;

pub use file_id::FileId;
pub use position::{Position, Span};

/// File extension of Dezyne source files (without the dot).
pub const DZN_EXTENSION: &str = "dzn";
