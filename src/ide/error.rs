//! Error types for IDE queries.
//!
//! Ordinary "nothing to show" outcomes are `None`. An [`IdeError`] means the
//! tree handed to a query broke a structural contract of the parser.

use thiserror::Error;

use crate::base::Span;

/// Structural contract violations found while answering a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdeError {
    /// A node was found outside the construct that must always enclose it.
    #[error("{found} at {span:?} has no enclosing {expected}")]
    MissingEnclosing {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },
}

impl IdeError {
    pub fn missing_enclosing(expected: &'static str, found: &'static str, span: Span) -> Self {
        Self::MissingEnclosing {
            expected,
            found,
            span,
        }
    }
}

/// Result alias for IDE queries.
pub type IdeResult<T> = Result<T, IdeError>;
