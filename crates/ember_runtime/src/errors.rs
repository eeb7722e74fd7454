//! Errors raised by native callables.
//!
//! Container operations never fail; they answer a miss with `Null`. Only code
//! running through `exec` can produce a `RuntimeError`.

pub mod messages {
    pub const NOT_AN_ARRAY: &str = "Not an array";
    pub const NOT_A_HASH: &str = "Not a hash";
    pub const NOT_A_STRING: &str = "Not a string";
    pub const NOT_EXECUTABLE: &str = "Not executable";
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("{name}: expected {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("{name}: {message}")]
    Argument { name: String, message: &'static str },
    #[error("{0}")]
    Native(String),
}

impl RuntimeError {
    pub fn native(message: impl Into<String>) -> Self {
        RuntimeError::Native(message.into())
    }

    pub fn argument(name: &str, message: &'static str) -> Self {
        RuntimeError::Argument {
            name: name.to_string(),
            message,
        }
    }
}

pub fn check_arity(name: &str, args: &[ember_core::Value], expected: usize) -> Result<(), RuntimeError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::Arity {
            name: name.to_string(),
            expected,
            got: args.len(),
        })
    }
}
