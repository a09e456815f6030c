//! The standard library of native primitives.
//!
//! Arithmetic, comparison, and logic cost one unit in every version;
//! string and byte primitives got cheaper in V3. Strings are measured in
//! characters, byte strings in bytes.

use crate::error::{NativeError, NativeResult};
use crate::function::{CostTable, NativeFn, NativeFunction};
use scrip_types::{FunctionHeader, Value};

/// All standard natives, ready to install into an evaluation context.
pub fn standard_library() -> Vec<NativeFunction> {
    let mut lib = Library::default();
    lib.register_arithmetic();
    lib.register_comparison();
    lib.register_logic();
    lib.register_strings();
    lib.funcs
}

#[derive(Default)]
struct Library {
    funcs: Vec<NativeFunction>,
}

impl Library {
    fn add(
        &mut self,
        name: &str,
        arity: usize,
        costs: CostTable,
        f: impl Fn(&[Value]) -> NativeResult<Value> + 'static,
    ) {
        self.funcs.push(NativeFunction {
            header: FunctionHeader::new(name, arity),
            costs,
            func: NativeFn::new(f),
        });
    }

    /// `+ - * / %` over integers, all checked.
    fn register_arithmetic(&mut self) {
        self.add("+", 2, CostTable::uniform(1), |args| {
            let (a, b) = int_pair(args)?;
            a.checked_add(b)
                .map(Value::Int)
                .ok_or(NativeError::Overflow("+"))
        });
        self.add("-", 2, CostTable::uniform(1), |args| {
            let (a, b) = int_pair(args)?;
            a.checked_sub(b)
                .map(Value::Int)
                .ok_or(NativeError::Overflow("-"))
        });
        self.add("*", 2, CostTable::uniform(1), |args| {
            let (a, b) = int_pair(args)?;
            a.checked_mul(b)
                .map(Value::Int)
                .ok_or(NativeError::Overflow("*"))
        });
        self.add("/", 2, CostTable::uniform(1), |args| {
            let (a, b) = int_pair(args)?;
            if b == 0 {
                return Err(NativeError::DivisionByZero);
            }
            a.checked_div(b)
                .map(Value::Int)
                .ok_or(NativeError::Overflow("/"))
        });
        self.add("%", 2, CostTable::uniform(1), |args| {
            let (a, b) = int_pair(args)?;
            if b == 0 {
                return Err(NativeError::DivisionByZero);
            }
            a.checked_rem(b)
                .map(Value::Int)
                .ok_or(NativeError::Overflow("%"))
        });
    }

    /// Structural equality over any values; ordering over integers.
    fn register_comparison(&mut self) {
        self.add("==", 2, CostTable::uniform(1), |args| {
            expect_arity(args, 2)?;
            Ok(Value::Bool(args[0] == args[1]))
        });
        self.add("<", 2, CostTable::uniform(1), |args| {
            let (a, b) = int_pair(args)?;
            Ok(Value::Bool(a < b))
        });
        self.add("<=", 2, CostTable::uniform(1), |args| {
            let (a, b) = int_pair(args)?;
            Ok(Value::Bool(a <= b))
        });
    }

    /// Boolean negation and the explicit failure primitive.
    fn register_logic(&mut self) {
        self.add("!", 1, CostTable::uniform(1), |args| {
            expect_arity(args, 1)?;
            match &args[0] {
                Value::Bool(b) => Ok(Value::Bool(!b)),
                other => Err(arg_type(0, "boolean", other)),
            }
        });
        self.add("throw", 1, CostTable::uniform(1), |args| {
            expect_arity(args, 1)?;
            match &args[0] {
                Value::Str(msg) => Err(NativeError::Raised(msg.clone())),
                other => Err(arg_type(0, "string", other)),
            }
        });
    }

    /// `size`, `take`, `drop`, `concat` over strings and byte strings.
    fn register_strings(&mut self) {
        self.add("size", 1, CostTable::uniform(1), |args| {
            expect_arity(args, 1)?;
            match &args[0] {
                Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
                Value::Bytes(b) => Ok(Value::Int(b.len() as i64)),
                other => Err(arg_type(0, "string or bytes", other)),
            }
        });
        self.add("take", 2, CostTable::per_version(6, 6, 3), |args| {
            expect_arity(args, 2)?;
            let n = int_at(args, 1)?;
            match &args[0] {
                Value::Str(s) => {
                    let n = clamp_len(n, s.chars().count());
                    Ok(Value::Str(s.chars().take(n).collect()))
                }
                Value::Bytes(b) => {
                    let n = clamp_len(n, b.len());
                    Ok(Value::Bytes(b[..n].to_vec()))
                }
                other => Err(arg_type(0, "string or bytes", other)),
            }
        });
        self.add("drop", 2, CostTable::per_version(6, 6, 3), |args| {
            expect_arity(args, 2)?;
            let n = int_at(args, 1)?;
            match &args[0] {
                Value::Str(s) => {
                    let n = clamp_len(n, s.chars().count());
                    Ok(Value::Str(s.chars().skip(n).collect()))
                }
                Value::Bytes(b) => {
                    let n = clamp_len(n, b.len());
                    Ok(Value::Bytes(b[n..].to_vec()))
                }
                other => Err(arg_type(0, "string or bytes", other)),
            }
        });
        self.add("concat", 2, CostTable::per_version(20, 20, 10), |args| {
            expect_arity(args, 2)?;
            match (&args[0], &args[1]) {
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
                (Value::Bytes(a), Value::Bytes(b)) => {
                    let mut out = a.clone();
                    out.extend_from_slice(b);
                    Ok(Value::Bytes(out))
                }
                (Value::Str(_), other) => Err(arg_type(1, "string", other)),
                (Value::Bytes(_), other) => Err(arg_type(1, "bytes", other)),
                (other, _) => Err(arg_type(0, "string or bytes", other)),
            }
        });
    }
}

// ── Argument helpers ──────────────────────────────────────────────────────

fn expect_arity(args: &[Value], expected: usize) -> NativeResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(NativeError::ArgumentCount {
            expected,
            actual: args.len(),
        })
    }
}

fn arg_type(index: usize, expected: &'static str, actual: &Value) -> NativeError {
    NativeError::ArgumentType {
        index,
        expected,
        actual: actual.type_name().to_string(),
    }
}

fn int_at(args: &[Value], index: usize) -> NativeResult<i64> {
    match &args[index] {
        Value::Int(n) => Ok(*n),
        other => Err(arg_type(index, "integer", other)),
    }
}

fn int_pair(args: &[Value]) -> NativeResult<(i64, i64)> {
    expect_arity(args, 2)?;
    Ok((int_at(args, 0)?, int_at(args, 1)?))
}

fn clamp_len(n: i64, len: usize) -> usize {
    n.clamp(0, len as i64) as usize
}
