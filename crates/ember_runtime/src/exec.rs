//! Uniform invocation of executable values.

use smallvec::SmallVec;

use ember_core::Value;

use crate::core::cell::{ClosureFn, Native, NativeFn, Payload};
use crate::core::heap::Heap;
use crate::errors::RuntimeError;

impl Heap {
    /// Wrap a plain native function.
    pub fn native(&mut self, f: NativeFn) -> Value {
        self.create(Payload::Exec(Native::Plain(f)))
    }

    /// Pair a closure-shaped native with auxiliary data as a program
    /// `[dispatcher, aux]`.
    pub fn closure(&mut self, f: ClosureFn, aux: Value) -> Value {
        let dispatcher = self.create(Payload::Exec(Native::Closure(f)));
        self.program(&[dispatcher, aux])
    }

    pub fn is_executable(&self, v: Value) -> bool {
        self.kind(v).is_executable()
    }

    /// Function and auxiliary data `callable` dispatches to.
    fn dispatch_target(&self, callable: Value) -> Option<(Native, Value)> {
        match &self.cell(callable)?.payload {
            Payload::Exec(native) => Some((*native, Value::NULL)),
            Payload::Program(items) => {
                let dispatcher = items.first().copied().unwrap_or(Value::NULL);
                let aux = items.get(1).copied().unwrap_or(Value::NULL);
                match &self.cell(dispatcher)?.payload {
                    Payload::Exec(native) => Some((*native, aux)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Invoke `callable` with `args`.
    ///
    /// Plain natives receive the arguments; closures also receive the
    /// program's auxiliary value. Non-executable values return `Null`. The
    /// callable and every argument stay retained for the duration of the call.
    pub fn exec(&mut self, callable: Value, args: &[Value]) -> Result<Value, RuntimeError> {
        let Some((native, aux)) = self.dispatch_target(callable) else {
            return Ok(Value::NULL);
        };
        self.retain(callable);
        for arg in args {
            self.retain(*arg);
        }
        let result = match native {
            Native::Plain(f) => f(self, args),
            Native::Closure(f) => f(self, aux, args),
        };
        for arg in args {
            self.release(*arg);
        }
        self.release(callable);
        result
    }

    /// `exec` with the arguments taken from an array value.
    pub fn exec_array(&mut self, callable: Value, args: Value) -> Result<Value, RuntimeError> {
        let args: SmallVec<[Value; 8]> = match self.items(args) {
            Some(items) => items.iter().copied().collect(),
            None if args.is_null() => SmallVec::new(),
            None => SmallVec::from_slice(&[args]),
        };
        self.exec(callable, &args)
    }
}
