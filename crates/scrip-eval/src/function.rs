//! Function descriptors resolvable through a context.

use scrip_stdlib::NativeFunction;
use scrip_types::{Expr, FunctionHeader};

/// A callable registered in a context.
#[derive(Debug, Clone)]
pub enum Function {
    /// A host primitive with a per-version cost table.
    Native(NativeFunction),
    /// A script-defined function; calls expand into a chain of let
    /// bindings over the body.
    User(UserFunction),
}

impl Function {
    /// The header this function is registered under.
    pub fn header(&self) -> &FunctionHeader {
        match self {
            Self::Native(native) => &native.header,
            Self::User(user) => &user.header,
        }
    }
}

/// A script-defined function.
#[derive(Debug, Clone)]
pub struct UserFunction {
    pub header: FunctionHeader,
    pub params: Vec<String>,
    pub body: Expr,
}

impl UserFunction {
    /// Build a descriptor; the header's arity is the parameter count.
    pub fn new(name: impl Into<String>, params: Vec<String>, body: Expr) -> Self {
        Self {
            header: FunctionHeader::new(name, params.len()),
            params,
            body,
        }
    }
}
