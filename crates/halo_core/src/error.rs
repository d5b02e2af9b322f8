//! Core error types

use thiserror::Error;

/// Errors raised when resolving values from a [`Context`](crate::Context)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// Nothing of the requested type was provided in this scope or any parent
    #[error("no `{0}` provided in this context or any parent")]
    Missing(&'static str),
}

pub type Result<T> = std::result::Result<T, ContextError>;
