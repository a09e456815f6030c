//! Immutable evaluation context: let bindings, functions, accumulated cost.
//!
//! Every operation returns a fresh context; the reducer threads contexts
//! by value. Captured frames are shared through `Rc`, and [`BTreeMap`]
//! keeps both tables deterministically ordered.

use crate::function::Function;
use scrip_types::{Expr, FunctionHeader, Value};
use std::collections::BTreeMap;
use std::rc::Rc;

/// A let entry: the (possibly partially reduced) bound expression, the
/// frame captured at declaration, and whether the expression is a value.
#[derive(Debug, Clone)]
pub struct LetBinding {
    pub value: Expr,
    pub captured: Rc<Context>,
    pub resolved: bool,
}

/// The environment an expression reduces under.
#[derive(Debug, Clone, Default)]
pub struct Context {
    lets: BTreeMap<String, LetBinding>,
    funcs: BTreeMap<FunctionHeader, Function>,
    cost: u64,
}

impl Context {
    /// An empty context with zero cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total cost charged so far.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Look up a let binding.
    pub fn let_binding(&self, name: &str) -> Option<&LetBinding> {
        self.lets.get(name)
    }

    /// Look up a function by header.
    pub fn function(&self, header: &FunctionHeader) -> Option<&Function> {
        self.funcs.get(header)
    }

    /// Charge `k` additional cost units.
    pub fn with_cost(mut self, k: u64) -> Self {
        self.cost = self.cost.saturating_add(k);
        self
    }

    /// Install or replace a binding. The captured frame is the context as
    /// it stands at this call, without the new binding.
    pub fn with_let(self, name: impl Into<String>, value: Expr, resolved: bool) -> Self {
        let captured = Rc::new(self.clone());
        let mut next = self;
        next.lets.insert(
            name.into(),
            LetBinding {
                value,
                captured,
                resolved,
            },
        );
        next
    }

    /// Install a predeclared value as a resolved binding. Resolved
    /// bindings never consult their captured frame, so none is kept.
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.lets.insert(
            name.into(),
            LetBinding {
                value: Expr::Value(value),
                captured: Rc::default(),
                resolved: true,
            },
        );
        self
    }

    /// Install predeclared values in bulk.
    pub fn with_values(
        self,
        values: impl IntoIterator<Item = (impl Into<String>, Value)>,
    ) -> Self {
        values
            .into_iter()
            .fold(self, |ctx, (name, value)| ctx.with_value(name, value))
    }

    /// Install or replace a function under its own header.
    pub fn with_function(mut self, function: Function) -> Self {
        self.funcs.insert(function.header().clone(), function);
        self
    }

    /// Install functions in bulk.
    pub fn with_functions(self, functions: impl IntoIterator<Item = Function>) -> Self {
        functions.into_iter().fold(self, Context::with_function)
    }

    /// Remove a binding. Forcing a let drops its own name from scope, so
    /// a self-referential value is reported as unknown instead of
    /// looping.
    pub(crate) fn without_let(mut self, name: &str) -> Self {
        self.lets.remove(name);
        self
    }

    /// Overlay `other` on this context: bindings and functions from
    /// `other` win, and the cost is the larger of the two. Used to
    /// restore a captured frame under the current one when a reference
    /// is forced.
    pub fn combine(&self, other: &Context) -> Self {
        let mut lets = self.lets.clone();
        lets.extend(other.lets.iter().map(|(k, v)| (k.clone(), v.clone())));
        let mut funcs = self.funcs.clone();
        funcs.extend(other.funcs.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            lets,
            funcs,
            cost: self.cost.max(other.cost),
        }
    }
}
