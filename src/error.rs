//! Contains [`Error`] and corresponding [`Result`].

use std::{error::Error as StdError, result};

/// A result with a specified [`Error`] type.
pub type Result<T, E = Error> = result::Result<T, E>;

type BoxedError = Box<dyn StdError + Send + Sync>;

/// Represents all possible errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The template's placeholder count does not match the number of
    /// supplied arguments. Raised before any round trip to the server.
    #[error("expected {expected} bound arguments, got {actual}")]
    ArgumentCountMismatch { expected: usize, actual: usize },
    /// An argument's type has no SQL Server mapping.
    #[error("{0} has no SQL Server mapping")]
    UnsupportedType(String),
    /// An argument with a known mapping could not be rendered as a literal.
    #[error("failed to encode an argument: {0}")]
    Encoding(#[source] BoxedError),
    /// A failure returned by the execution collaborator, propagated
    /// unchanged and never retried at this layer.
    #[error("execution failed: {0}")]
    Collaborator(#[source] BoxedError),
    /// The requested mechanism does not exist on the connected dialect.
    #[error("{0} is not supported by this dialect")]
    UnsupportedOperation(&'static str),
}

assert_impl_all!(Error: StdError, Send, Sync);
