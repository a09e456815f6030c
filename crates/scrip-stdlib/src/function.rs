//! Native function descriptors: implementation, header, and cost table.

use crate::error::NativeResult;
use scrip_types::{FunctionHeader, StdlibVersion, Value};
use std::fmt;
use std::rc::Rc;

/// A pure native implementation: fully evaluated arguments in, value or
/// domain error out. Evaluation is single-threaded, so `Rc` suffices.
#[derive(Clone)]
pub struct NativeFn(pub Rc<dyn Fn(&[Value]) -> NativeResult<Value>>);

impl NativeFn {
    pub fn new(f: impl Fn(&[Value]) -> NativeResult<Value> + 'static) -> Self {
        Self(Rc::new(f))
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<native fn>")
    }
}

/// Cost of one native call, per standard-library version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostTable {
    by_version: [u64; StdlibVersion::COUNT],
}

impl CostTable {
    /// The same cost in every version.
    pub const fn uniform(cost: u64) -> Self {
        Self {
            by_version: [cost; StdlibVersion::COUNT],
        }
    }

    /// One cost per version.
    pub const fn per_version(v1: u64, v2: u64, v3: u64) -> Self {
        Self {
            by_version: [v1, v2, v3],
        }
    }

    /// Cost charged under `version`.
    pub fn cost(&self, version: StdlibVersion) -> u64 {
        self.by_version[version.index()]
    }
}

/// A registered native function.
#[derive(Debug, Clone)]
pub struct NativeFunction {
    pub header: FunctionHeader,
    pub costs: CostTable,
    pub func: NativeFn,
}
