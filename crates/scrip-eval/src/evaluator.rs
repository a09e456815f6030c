//! The reducer: budget-bounded reduction of expression trees.
//!
//! Dispatch is on the outermost constructor. Each step either charges
//! cost it has already checked against the limit or returns a residual
//! expression recording the progress made, so a later run with a larger
//! budget picks up where this one stopped.

use crate::context::Context;
use crate::error::{EvalError, EvalResult};
use crate::function::{Function, UserFunction};
use scrip_stdlib::NativeFunction;
use scrip_types::{Decl, Expr, FunctionHeader, StdlibVersion, Value};

/// The outcome of an evaluation: the residual expression (a value when
/// the budget sufficed) and the total cost charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub expr: Expr,
    pub cost: u64,
}

impl Evaluation {
    /// True when the expression reduced all the way to a value.
    pub fn is_value(&self) -> bool {
        self.expr.is_value()
    }

    /// The resulting value, if fully reduced.
    pub fn as_value(&self) -> Option<&Value> {
        self.expr.as_value()
    }
}

/// Reduce `expr` under `ctx` until it is a value or `limit` cost units
/// have been consumed. `version` selects the native cost tables.
pub fn evaluate(
    expr: Expr,
    ctx: Context,
    limit: u64,
    version: StdlibVersion,
) -> EvalResult<Evaluation> {
    let (expr, ctx) = Evaluator::new(limit, version).reduce(expr, ctx)?;
    Ok(Evaluation {
        expr,
        cost: ctx.cost(),
    })
}

/// A reducer configured with a budget and a standard-library version.
pub struct Evaluator {
    limit: u64,
    version: StdlibVersion,
}

impl Evaluator {
    pub fn new(limit: u64, version: StdlibVersion) -> Self {
        Self { limit, version }
    }

    fn exhausted(&self, ctx: &Context) -> bool {
        ctx.cost() >= self.limit
    }

    /// One full reduction pass. Returns the reduced expression and the
    /// evolved context; the cost never decreases. An exhausted context
    /// passes the expression through unchanged.
    pub fn reduce(&self, expr: Expr, ctx: Context) -> EvalResult<(Expr, Context)> {
        if self.exhausted(&ctx) {
            return Ok((expr, ctx));
        }
        match expr {
            Expr::Value(_) => Ok((expr, ctx)),
            Expr::Ref(name) => self.reduce_ref(name, ctx),
            Expr::Block { decl, body } => self.reduce_block(decl, *body, ctx),
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => self.reduce_if(*cond, *then_branch, *else_branch, ctx),
            Expr::Call { header, args } => self.reduce_call(header, args, ctx),
            Expr::Getter { obj, field } => self.reduce_getter(*obj, field, ctx),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Blocks
    // ══════════════════════════════════════════════════════════════════════

    fn reduce_block(&self, decl: Decl, body: Expr, ctx: Context) -> EvalResult<(Expr, Context)> {
        match decl {
            Decl::Let { name, value } => {
                let ctx = ctx.with_let(name.clone(), *value, false);
                let (body, ctx) = self.reduce(body, ctx)?;
                if body.is_value() {
                    return Ok((body, ctx));
                }
                // Rebuild around the stored expression: any reduction done
                // while forcing the binding survives into the residual.
                let stored = ctx.let_binding(&name).ok_or_else(|| {
                    EvalError::Internal(format!("binding '{name}' vanished during block reduction"))
                })?;
                let residual = Expr::let_in(name.clone(), stored.value.clone(), body);
                Ok((residual, ctx))
            }
            Decl::Func { name, params, body: fn_body } => {
                let function =
                    UserFunction::new(name.clone(), params.clone(), (*fn_body).clone());
                let ctx = ctx.with_function(Function::User(function));
                let (body, ctx) = self.reduce(body, ctx)?;
                if body.is_value() {
                    return Ok((body, ctx));
                }
                let residual = Expr::Block {
                    decl: Decl::Func {
                        name,
                        params,
                        body: fn_body,
                    },
                    body: Box::new(body),
                };
                Ok((residual, ctx))
            }
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // References
    // ══════════════════════════════════════════════════════════════════════

    /// Forcing is lazy and at most once: a resolved binding costs one
    /// unit; an unresolved one is reduced under its captured frame
    /// overlaid with the current one, then memoized.
    fn reduce_ref(&self, name: String, ctx: Context) -> EvalResult<(Expr, Context)> {
        let binding = ctx
            .let_binding(&name)
            .cloned()
            .ok_or_else(|| EvalError::UnknownBinding(name.clone()))?;
        if binding.resolved {
            return Ok((binding.value, ctx.with_cost(1)));
        }
        let combined = binding.captured.combine(&ctx).without_let(&name);
        let (value, ctx) = self.reduce(binding.value, combined)?;
        if self.exhausted(&ctx) {
            // Keep the partial progress under the same name; the lookup
            // itself is not charged.
            Ok((Expr::Ref(name.clone()), ctx.with_let(name, value, false)))
        } else {
            Ok((
                value.clone(),
                ctx.with_let(name, value, true).with_cost(1),
            ))
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Conditionals
    // ══════════════════════════════════════════════════════════════════════

    fn reduce_if(
        &self,
        cond: Expr,
        then_branch: Expr,
        else_branch: Expr,
        ctx: Context,
    ) -> EvalResult<(Expr, Context)> {
        let (cond, ctx) = self.reduce(cond, ctx)?;
        if self.exhausted(&ctx) {
            return Ok((Expr::if_else(cond, then_branch, else_branch), ctx));
        }
        match cond {
            Expr::Value(Value::Bool(true)) => self.reduce(then_branch, ctx.with_cost(1)),
            Expr::Value(Value::Bool(false)) => self.reduce(else_branch, ctx.with_cost(1)),
            Expr::Value(other) => Err(EvalError::TypeMismatch(format!(
                "condition must be a boolean, got {}",
                other.type_name()
            ))),
            residual => Ok((Expr::if_else(residual, then_branch, else_branch), ctx)),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Calls
    // ══════════════════════════════════════════════════════════════════════

    fn reduce_call(
        &self,
        header: FunctionHeader,
        args: Vec<Expr>,
        ctx: Context,
    ) -> EvalResult<(Expr, Context)> {
        let function = ctx
            .function(&header)
            .cloned()
            .ok_or_else(|| EvalError::UnknownFunction(header.clone()))?;
        if args.len() != header.arity {
            return Err(EvalError::WrongArity {
                expected: header.arity,
                actual: args.len(),
                header,
            });
        }

        // Arguments reduce strictly left to right; once the budget runs
        // out the remaining ones pass through untouched.
        let mut reduced = Vec::with_capacity(args.len());
        let mut ctx = ctx;
        for arg in args {
            let (arg, next) = self.reduce(arg, ctx)?;
            ctx = next;
            reduced.push(arg);
        }

        if reduced.iter().any(|arg| !arg.is_value()) {
            return Ok((Expr::Call { header, args: reduced }, ctx));
        }
        let values: Vec<Value> = reduced
            .into_iter()
            .filter_map(|arg| arg.into_value().ok())
            .collect();

        match function {
            Function::Native(native) => self.invoke_native(header, native, values, ctx),
            Function::User(user) => self.expand_user(user, values, ctx),
        }
    }

    /// Natives are atomic, so the charge is checked against the limit
    /// before the call; a call that would overshoot is deferred intact
    /// and nothing is charged.
    fn invoke_native(
        &self,
        header: FunctionHeader,
        native: NativeFunction,
        values: Vec<Value>,
        ctx: Context,
    ) -> EvalResult<(Expr, Context)> {
        let cost = native.costs.cost(self.version);
        if ctx.cost().saturating_add(cost) > self.limit {
            let args = values.into_iter().map(Expr::Value).collect();
            return Ok((Expr::Call { header, args }, ctx));
        }
        match (native.func.0)(&values) {
            Ok(result) => Ok((Expr::Value(result), ctx.with_cost(cost))),
            Err(err) => Err(EvalError::NativeFailure {
                header,
                message: err.to_string(),
                cost: ctx.cost(),
            }),
        }
    }

    /// A user call expands into a right-nested chain of let bindings over
    /// the body, reduced under the current context. The caller keeps its
    /// own bindings and functions afterwards; only cost propagates back.
    fn expand_user(
        &self,
        user: UserFunction,
        values: Vec<Value>,
        ctx: Context,
    ) -> EvalResult<(Expr, Context)> {
        let mut body = user.body;
        for (param, value) in user.params.into_iter().zip(values).rev() {
            body = Expr::let_in(param, Expr::Value(value), body);
        }
        let caller = ctx.clone();
        let (result, inner) = self.reduce(body, ctx)?;
        let charged = inner.cost().saturating_sub(caller.cost());
        Ok((result, caller.with_cost(charged)))
    }

    // ══════════════════════════════════════════════════════════════════════
    // Getters
    // ══════════════════════════════════════════════════════════════════════

    fn reduce_getter(
        &self,
        obj: Expr,
        field: String,
        ctx: Context,
    ) -> EvalResult<(Expr, Context)> {
        let (obj, ctx) = self.reduce(obj, ctx)?;
        if self.exhausted(&ctx) {
            return Ok((Expr::getter(obj, field), ctx));
        }
        match obj {
            Expr::Value(Value::Obj {
                type_name,
                mut fields,
            }) => match fields.remove(&field) {
                Some(value) => Ok((Expr::Value(value), ctx.with_cost(1))),
                None => Err(EvalError::MissingField { type_name, field }),
            },
            Expr::Value(other) => Err(EvalError::TypeMismatch(format!(
                "cannot access field '{field}' on {}",
                other.type_name()
            ))),
            residual => Ok((Expr::getter(residual, field), ctx)),
        }
    }
}
