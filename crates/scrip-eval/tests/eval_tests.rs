//! Integration tests for the scrip reducer.
//!
//! Covers operational semantics:
//! - conditionals and laziness
//! - let bindings, forcing, and memoization
//! - native and user function calls
//! - getters
//! - structural and native errors

use scrip_eval::{
    evaluate, standard_context, EvalError, Evaluation, Evaluator, Function, UserFunction,
};
use scrip_types::{Expr, FunctionHeader, StdlibVersion, Value};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::call(FunctionHeader::new(name, args.len()), args)
}

fn add(a: Expr, b: Expr) -> Expr {
    call("+", vec![a, b])
}

fn int(n: i64) -> Expr {
    Expr::from(n)
}

/// Evaluate under the standard library at V3.
fn run(expr: Expr, limit: u64) -> Evaluation {
    evaluate(expr, standard_context(), limit, StdlibVersion::V3).expect("evaluation failed")
}

fn run_err(expr: Expr, limit: u64) -> EvalError {
    evaluate(expr, standard_context(), limit, StdlibVersion::V3)
        .expect_err("evaluation unexpectedly succeeded")
}

// ══════════════════════════════════════════════════════════════════════════════
// Conditionals
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn if_true_takes_then_branch_without_touching_else() {
    // The else branch references a missing name; it must never be reduced.
    let e = Expr::if_else(Expr::from(true), int(1), Expr::ref_to("missing"));
    let r = run(e, 1);
    assert_eq!(r.expr, int(1));
    assert_eq!(r.cost, 1);
}

#[test]
fn if_false_takes_else_branch() {
    let e = Expr::if_else(Expr::from(false), Expr::ref_to("missing"), int(2));
    let r = run(e, 10);
    assert_eq!(r.expr, int(2));
    assert_eq!(r.cost, 1);
}

#[test]
fn if_condition_reduces_first() {
    let e = Expr::if_else(
        call("==", vec![add(int(1), int(1)), int(2)]),
        int(10),
        int(20),
    );
    let r = run(e, 100);
    assert_eq!(r.expr, int(10));
    // inner add + equality + branch charge
    assert_eq!(r.cost, 3);
}

#[test]
fn if_non_boolean_condition_is_fatal() {
    let err = run_err(Expr::if_else(int(1), int(2), int(3)), 100);
    assert_eq!(
        err,
        EvalError::TypeMismatch("condition must be a boolean, got integer".to_string())
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Let bindings
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn let_forces_once_and_memoizes() {
    // let x = 2 + 3; x + x
    let e = Expr::let_in(
        "x",
        add(int(2), int(3)),
        add(Expr::ref_to("x"), Expr::ref_to("x")),
    );
    let r = run(e, 100);
    assert_eq!(r.expr, int(10));
    // one add while forcing, two reference lookups, one final add
    assert_eq!(r.cost, 4);
}

#[test]
fn unused_binding_costs_nothing() {
    let heavy = add(add(int(1), int(2)), add(int(3), int(4)));
    let e = Expr::let_in("x", heavy, int(42));
    let r = run(e, 100);
    assert_eq!(r.expr, int(42));
    assert_eq!(r.cost, 0);
}

#[test]
fn nested_lets_resolve_through_scopes() {
    // let a = 1; let x = a + 1; x
    let e = Expr::let_in(
        "a",
        int(1),
        Expr::let_in("x", add(Expr::ref_to("a"), int(1)), Expr::ref_to("x")),
    );
    let r = run(e, 100);
    assert_eq!(r.expr, int(2));
    // forcing a (lookup) + add + lookup of x
    assert_eq!(r.cost, 3);
}

#[test]
fn let_self_reference_is_unknown_binding() {
    let e = Expr::let_in("x", Expr::ref_to("x"), Expr::ref_to("x"));
    assert_eq!(run_err(e, 100), EvalError::UnknownBinding("x".to_string()));
}

#[test]
fn unknown_binding_is_fatal() {
    let err = run_err(Expr::if_else(Expr::ref_to("undef"), int(1), int(2)), 100);
    assert_eq!(err, EvalError::UnknownBinding("undef".to_string()));
    assert_eq!(err.to_string(), "unknown binding: undef");
}

// ══════════════════════════════════════════════════════════════════════════════
// Getters
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn getter_projects_field() {
    let point = Value::obj("P", [("x", Value::Int(7)), ("y", Value::Int(9))]);
    let r = run(Expr::getter(Expr::Value(point), "y"), 100);
    assert_eq!(r.expr, int(9));
    assert_eq!(r.cost, 1);
}

#[test]
fn getter_missing_field_is_fatal() {
    let point = Value::obj("P", [("x", Value::Int(7))]);
    let err = run_err(Expr::getter(Expr::Value(point), "z"), 100);
    assert_eq!(
        err,
        EvalError::MissingField {
            type_name: "P".to_string(),
            field: "z".to_string(),
        }
    );
    assert_eq!(err.to_string(), "object 'P' has no field 'z'");
}

#[test]
fn getter_on_non_object_is_fatal() {
    let err = run_err(Expr::getter(int(1), "x"), 100);
    assert_eq!(
        err,
        EvalError::TypeMismatch("cannot access field 'x' on integer".to_string())
    );
}

#[test]
fn getter_target_reduces_first() {
    // let p = P(x: 7, y: 9); p.x + p.y
    let point = Value::obj("P", [("x", Value::Int(7)), ("y", Value::Int(9))]);
    let e = Expr::let_in(
        "p",
        Expr::Value(point),
        add(
            Expr::getter(Expr::ref_to("p"), "x"),
            Expr::getter(Expr::ref_to("p"), "y"),
        ),
    );
    let r = run(e, 100);
    assert_eq!(r.expr, int(16));
    // two lookups, two projections, one add
    assert_eq!(r.cost, 5);
}

// ══════════════════════════════════════════════════════════════════════════════
// Calls: natives
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn unknown_function_is_fatal() {
    let err = run_err(call("nosuch", vec![int(1)]), 100);
    assert_eq!(
        err,
        EvalError::UnknownFunction(FunctionHeader::new("nosuch", 1))
    );
    assert_eq!(err.to_string(), "unknown function: nosuch/1");
}

#[test]
fn wrong_arity_is_fatal() {
    let e = Expr::call(FunctionHeader::new("+", 2), vec![int(1)]);
    let err = run_err(e, 100);
    assert_eq!(
        err,
        EvalError::WrongArity {
            header: FunctionHeader::new("+", 2),
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn division_by_zero_aborts() {
    let err = run_err(call("/", vec![int(1), int(0)]), 100);
    assert_eq!(
        err,
        EvalError::NativeFailure {
            header: FunctionHeader::new("/", 2),
            message: "division by zero".to_string(),
            cost: 0,
        }
    );
}

#[test]
fn throw_preserves_cost_already_charged() {
    // The branch charge lands before the failing call.
    let e = Expr::if_else(Expr::from(true), call("throw", vec![Expr::from("boom")]), int(0));
    let err = run_err(e, 100);
    assert_eq!(
        err,
        EvalError::NativeFailure {
            header: FunctionHeader::new("throw", 1),
            message: "boom".to_string(),
            cost: 1,
        }
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Calls: user functions
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn user_function_reduces_through_let_chain() {
    // func f(a) = a + a; f(3)
    let e = Expr::func_in(
        "f",
        &["a"],
        add(Expr::ref_to("a"), Expr::ref_to("a")),
        call("f", vec![int(3)]),
    );
    let r = run(e, 100);
    assert_eq!(r.expr, int(6));
    // parameter lookup, memoized lookup, one add
    assert_eq!(r.cost, 3);
}

#[test]
fn user_function_bindings_do_not_leak() {
    let e = Expr::func_in(
        "f",
        &["a"],
        add(Expr::ref_to("a"), Expr::ref_to("a")),
        call("f", vec![int(3)]),
    );
    let ev = Evaluator::new(100, StdlibVersion::V3);
    let (expr, ctx) = ev.reduce(e, standard_context()).unwrap();
    assert_eq!(expr, int(6));
    assert!(ctx.let_binding("a").is_none());
    assert_eq!(ctx.cost(), 3);
}

#[test]
fn user_function_sees_outer_bindings() {
    // let n = 2; func scale(b) = n * b; scale(21)
    let e = Expr::let_in(
        "n",
        int(2),
        Expr::func_in(
            "scale",
            &["b"],
            call("*", vec![Expr::ref_to("n"), Expr::ref_to("b")]),
            call("scale", vec![int(21)]),
        ),
    );
    let r = run(e, 100);
    assert_eq!(r.expr, int(42));
}

#[test]
fn recursive_function_terminates() {
    // func fact(n) = if n == 0 then 1 else n * fact(n - 1); fact(5)
    let body = Expr::if_else(
        call("==", vec![Expr::ref_to("n"), int(0)]),
        int(1),
        call(
            "*",
            vec![
                Expr::ref_to("n"),
                call("fact", vec![call("-", vec![Expr::ref_to("n"), int(1)])]),
            ],
        ),
    );
    let e = Expr::func_in("fact", &["n"], body, call("fact", vec![int(5)]));
    let r = run(e, 1_000);
    assert_eq!(r.expr, int(120));
}

#[test]
fn predeclared_user_function_is_callable() {
    let double = UserFunction::new(
        "double",
        vec!["a".to_string()],
        add(Expr::ref_to("a"), Expr::ref_to("a")),
    );
    let ctx = standard_context().with_function(Function::User(double));
    let r = evaluate(call("double", vec![int(21)]), ctx, 100, StdlibVersion::V3).unwrap();
    assert_eq!(r.expr, int(42));
    assert_eq!(r.cost, 3);
}

// ══════════════════════════════════════════════════════════════════════════════
// Predeclared bindings
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn predeclared_values_resolve_as_resolved_bindings() {
    let ctx = standard_context().with_values([("height", Value::Int(100))]);
    let r = evaluate(
        add(Expr::ref_to("height"), int(1)),
        ctx,
        10,
        StdlibVersion::V3,
    )
    .unwrap();
    assert_eq!(r.expr, int(101));
    // one lookup, one add
    assert_eq!(r.cost, 2);
}
