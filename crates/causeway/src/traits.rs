//! Capability traits for error types.
//!
//! A small closed set of capabilities an error may offer beyond
//! `std::error::Error`: carrying a code, rendering a stack, exposing a root
//! cause, and exposing a detached current level. [`Error`] implements all
//! four; the standard `source` method serves as the unwrap capability.
//!
//! Dynamic discovery on a `dyn` error cannot ask for these traits directly,
//! so the [`crate::query`] functions attempt capabilities in a fixed order:
//! a downcast to [`Error`] first, the `source` chain second.

use causeway_code::Code;

use crate::chain::{Error, RootCause};
use crate::config::StackConfig;

/// Errors that carry an error code.
pub trait Coded {
    /// The effective code, after any chain inheritance.
    fn code(&self) -> &Code;
}

/// Errors that can render a captured stack trace.
pub trait Stacked {
    /// Render the stack with an explicit configuration.
    fn stack_with(&self, config: &StackConfig) -> String;
}

/// Errors that expose the root cause of their chain.
pub trait Caused {
    /// The innermost error of the chain.
    fn root_cause(&self) -> RootCause<'_>;
}

/// Errors that expose a detached view of their current level.
pub trait Leveled {
    /// This level alone, with any cause cleared.
    fn current(&self) -> Error;
}

impl Coded for Error {
    fn code(&self) -> &Code {
        Error::code(self)
    }
}

impl Stacked for Error {
    fn stack_with(&self, config: &StackConfig) -> String {
        Error::stack_with(self, config)
    }
}

impl Caused for Error {
    fn root_cause(&self) -> RootCause<'_> {
        Error::cause(self)
    }
}

impl Leveled for Error {
    fn current(&self) -> Error {
        Error::current(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe<E: Coded + Leveled>(err: &E) -> String {
        format!("[{}] {}", Coded::code(err), Leveled::current(err))
    }

    #[test]
    fn test_generic_access_through_capabilities() {
        let err = Error::wrap_code(
            Code::OPERATION_FAILED,
            Some(Error::new("inner")),
            "outer",
        )
        .unwrap();
        assert_eq!(describe(&err), "[60:Operation Failed] outer");
    }

    #[test]
    fn test_object_safe_capabilities() {
        let err = Error::new_code(Code::NOT_FOUND, "gone");
        let coded: &dyn Coded = &err;
        assert_eq!(coded.code(), &Code::NOT_FOUND);

        let caused: &dyn Caused = &err;
        assert_eq!(caused.root_cause().to_string(), "gone");
    }
}
