//! Display modes for chain errors.
//!
//! Four modes, selected by format flags:
//!
//! - `{}` / `{:?}`  — full chain text
//! - `{:-}` / `{:-?}` — current-level text (or the full text when the
//!   current text is empty)
//! - `{:+}` — full filtered stack dump
//! - `{:+?}` — full chain text, a newline, then the stack dump
//!
//! The stack modes read the installed process configuration; use
//! [`Error::stack_with`] for an explicit one.

use std::fmt;

use crate::chain::Error;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.sign_minus() {
            f.write_str(&self.level_message())
        } else if f.sign_plus() {
            f.write_str(&self.stack())
        } else {
            f.write_str(&self.full_message())
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.sign_minus() {
            f.write_str(&self.level_message())
        } else if f.sign_plus() {
            write!(f, "{}\n{}", self.full_message(), self.stack())
        } else {
            f.write_str(&self.full_message())
        }
    }
}
