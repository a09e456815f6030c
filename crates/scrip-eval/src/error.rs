//! Evaluator error types.
//!
//! Budget exhaustion is not an error — it is reported as a non-value
//! residual. These variants cover structural faults in the input tree
//! and domain failures surfaced by native functions.

use scrip_types::FunctionHeader;
use thiserror::Error;

/// Fatal evaluation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A reference to a name with no binding in scope.
    #[error("unknown binding: {0}")]
    UnknownBinding(String),

    /// A call to a header with no registered function.
    #[error("unknown function: {0}")]
    UnknownFunction(FunctionHeader),

    /// A getter on an object lacking the requested field.
    #[error("object '{type_name}' has no field '{field}'")]
    MissingField { type_name: String, field: String },

    /// A call whose argument count disagrees with its header.
    #[error("function '{header}' expects {expected} arguments, got {actual}")]
    WrongArity {
        header: FunctionHeader,
        expected: usize,
        actual: usize,
    },

    /// A value of the wrong kind in a strict position.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A native function reported a domain failure. `cost` is the amount
    /// already charged when the call was made.
    #[error("function '{header}' failed after {cost} cost units: {message}")]
    NativeFailure {
        header: FunctionHeader,
        message: String,
        cost: u64,
    },

    /// An impossible state; indicates a bug in the evaluator itself.
    #[error("internal evaluator error: {0}")]
    Internal(String),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
