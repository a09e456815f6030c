//! Failures a native function may report.

use thiserror::Error;

/// Domain error raised by a native implementation.
///
/// Natives are pure and total over well-typed inputs; these variants
/// cover arithmetic traps, ill-typed invocations, and the explicit
/// `throw` primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NativeError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in '{0}'")]
    Overflow(&'static str),

    #[error("argument {index}: expected {expected}, got {actual}")]
    ArgumentType {
        index: usize,
        expected: &'static str,
        actual: String,
    },

    #[error("expected {expected} arguments, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    /// Raised by the `throw` primitive with a script-supplied message.
    #[error("{0}")]
    Raised(String),
}

/// Result alias for native implementations.
pub type NativeResult<T> = Result<T, NativeError>;
