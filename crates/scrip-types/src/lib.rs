//! Shared types for the scrip evaluator.
//!
//! This crate defines the expression tree, runtime values, function
//! headers, and standard-library versions used across all evaluator
//! stages. It carries no evaluation logic of its own.

mod expr;
mod header;
mod value;

pub use expr::{Decl, Expr};
pub use header::{FunctionHeader, StdlibVersion};
pub use value::Value;
