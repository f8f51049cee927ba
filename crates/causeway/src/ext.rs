//! Result adapters for the wrap-and-return idiom.

use causeway_code::Code;

use crate::chain::{BoxError, Error};

/// Wrap the error arm of a `Result` into a chain node, preserving the
/// original as the cause and capturing a stack at the wrap site.
pub trait ResultExt<T> {
    /// Wrap the error with `text`.
    fn wrap_err(self, text: impl Into<String>) -> Result<T, Error>;

    /// Wrap the error with an explicit `code` and `text`.
    fn wrap_err_code(self, code: Code, text: impl Into<String>) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn wrap_err(self, text: impl Into<String>) -> Result<T, Error> {
        self.map_err(|cause| Error::make(Some(cause.into()), 0, text.into(), Code::NIL))
    }

    fn wrap_err_code(self, code: Code, text: impl Into<String>) -> Result<T, Error> {
        self.map_err(|cause| Error::make(Some(cause.into()), 0, text.into(), code))
    }
}
