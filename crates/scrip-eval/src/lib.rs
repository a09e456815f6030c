//! Cost-bounded, resumable evaluator for scrip expression trees.
//!
//! The reducer walks an expression under a caller-supplied complexity
//! budget. When the budget runs out mid-reduction, the partially reduced
//! tree comes back together with the cost charged so far; re-evaluating
//! that residual with a larger budget continues from the recorded
//! progress. An expression the budget does cover reduces all the way to
//! a value.
//!
//! Evaluation is synchronous and single-threaded; recursion depth follows
//! the nesting depth of the input, which the upstream compiler caps.

mod context;
mod error;
mod evaluator;
mod function;

pub use context::{Context, LetBinding};
pub use error::{EvalError, EvalResult};
pub use evaluator::{evaluate, Evaluation, Evaluator};
pub use function::{Function, UserFunction};

/// A context preloaded with the standard library natives.
pub fn standard_context() -> Context {
    Context::new().with_functions(
        scrip_stdlib::standard_library()
            .into_iter()
            .map(Function::Native),
    )
}
