//! The error chain node.
//!
//! An [`Error`] wraps an optional causing error, an optional code, a display
//! text, and a stack snapshot captured at construction. Nodes link backward
//! through their cause, forming a chain whose queries (code lookup, root
//! cause, membership) walk toward the terminus.
//!
//! Nodes are immutable once created, except for [`Error::set_code`].

use std::error::Error as StdError;
use std::fmt;

use causeway_code::Code;

use crate::stack::Stack;

/// A boxed error usable as a chain cause.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// One level of an error chain.
///
/// Created by the `new*` constructors (terminal node) or the `wrap*`
/// constructors (node referencing a pre-existing cause). The `wrap*` family
/// returns `None` when given `None`, so propagation code can wrap
/// unconditionally: wrapping "no error" is "no error".
pub struct Error {
    pub(crate) cause: Option<BoxError>,
    pub(crate) stack: Stack,
    pub(crate) text: String,
    pub(crate) code: Code,
}

impl Error {
    pub(crate) fn make(cause: Option<BoxError>, skip: usize, text: String, code: Code) -> Self {
        Self {
            cause,
            stack: Stack::capture(skip),
            text,
            code,
        }
    }

    /// Create a terminal error from the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self::make(None, 0, text.into(), Code::NIL)
    }

    /// Create a terminal error, skipping `skip` additional caller frames in
    /// the captured stack. Used by wrapper functions so the recorded trace
    /// points at the real caller.
    pub fn new_with_skip(skip: usize, text: impl Into<String>) -> Self {
        Self::make(None, skip, text.into(), Code::NIL)
    }

    /// Create a terminal error carrying a code and text.
    pub fn new_code(code: Code, text: impl Into<String>) -> Self {
        Self::make(None, 0, text.into(), code)
    }

    /// Create a terminal error carrying a code, skipping `skip` additional
    /// caller frames in the captured stack.
    pub fn new_code_with_skip(code: Code, skip: usize, text: impl Into<String>) -> Self {
        Self::make(None, skip, text.into(), code)
    }

    /// Wrap an error with text, capturing a fresh stack at the wrap site.
    ///
    /// Returns `None` when `cause` is `None`. The new node carries no code
    /// of its own; [`Error::code`] defers to the wrapped chain.
    pub fn wrap<E>(cause: Option<E>, text: impl Into<String>) -> Option<Self>
    where
        E: Into<BoxError>,
    {
        cause.map(|c| Self::make(Some(c.into()), 0, text.into(), Code::NIL))
    }

    /// Wrap an error with text, skipping `skip` additional caller frames in
    /// the captured stack.
    pub fn wrap_with_skip<E>(skip: usize, cause: Option<E>, text: impl Into<String>) -> Option<Self>
    where
        E: Into<BoxError>,
    {
        cause.map(|c| Self::make(Some(c.into()), skip, text.into(), Code::NIL))
    }

    /// Wrap an error with an explicit code and text.
    pub fn wrap_code<E>(code: Code, cause: Option<E>, text: impl Into<String>) -> Option<Self>
    where
        E: Into<BoxError>,
    {
        cause.map(|c| Self::make(Some(c.into()), 0, text.into(), code))
    }

    /// Wrap an error with an explicit code and text, skipping `skip`
    /// additional caller frames in the captured stack.
    pub fn wrap_code_with_skip<E>(
        code: Code,
        skip: usize,
        cause: Option<E>,
        text: impl Into<String>,
    ) -> Option<Self>
    where
        E: Into<BoxError>,
    {
        cause.map(|c| Self::make(Some(c.into()), skip, text.into(), code))
    }

    /// Start building an error with explicit parts.
    pub fn builder() -> ErrorBuilder {
        ErrorBuilder::new()
    }

    /// The display text of this level. May be empty when the level carries
    /// only a code.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The effective code of this error.
    ///
    /// A level without a code of its own defers to the nearest ancestor in
    /// the chain that carries one; [`Code::NIL`] when the chain is exhausted.
    /// Inheritance is computed on query, never stored.
    pub fn code(&self) -> &Code {
        if !self.code.is_nil() {
            return &self.code;
        }
        match self.source() {
            Some(cause) => crate::query::code(cause),
            None => {
                static NIL: Code = Code::NIL;
                &NIL
            }
        }
    }

    /// Overwrite the code of this level. A [`Code::NIL`] argument is
    /// ignored.
    pub fn set_code(&mut self, code: Code) {
        if code.is_nil() {
            return;
        }
        self.code = code;
    }

    /// The root cause of the chain.
    ///
    /// Walks past chain nodes toward the terminus. An external terminus is
    /// returned by reference; a node terminus is lifted into a standalone
    /// text-only error.
    pub fn cause(&self) -> RootCause<'_> {
        let mut node = self;
        loop {
            match node.cause.as_deref() {
                Some(next) => match next.downcast_ref::<Error>() {
                    Some(inner) => node = inner,
                    None => return RootCause::External(next),
                },
                None => return RootCause::Synthesized(PlainError::new(node.text.clone())),
            }
        }
    }

    /// A detached copy of this level: same text, code, and captured stack,
    /// with the cause cleared.
    pub fn current(&self) -> Error {
        Error {
            cause: None,
            stack: self.stack.clone(),
            text: self.text.clone(),
            code: self.code.clone(),
        }
    }

    /// Whether this error equals `target`.
    ///
    /// Two errors are equal when their effective codes match and this
    /// level's text matches the full rendered message of `target`. Captured
    /// stacks are excluded. The comparison is shallow by design.
    pub fn equal(&self, target: &(dyn StdError + 'static)) -> bool {
        if same_object(self, target) {
            return true;
        }
        if self.code() != crate::query::code(target) {
            return false;
        }
        self.text == target.to_string()
    }

    /// Whether `target` appears in this chain.
    ///
    /// Tests equality at this level, then unwraps one level and delegates:
    /// a chain node answers with its own membership test, an external error
    /// is walked by identity through its `source` chain.
    pub fn is(&self, target: &(dyn StdError + 'static)) -> bool {
        if self.equal(target) {
            return true;
        }
        let Some(next) = self.source() else {
            return false;
        };
        let mut current = Some(next);
        while let Some(err) = current {
            if same_object(err, target) {
                return true;
            }
            if let Some(node) = err.downcast_ref::<Error>() {
                return node.is(target);
            }
            current = err.source();
        }
        false
    }

    pub(crate) fn full_message(&self) -> String {
        let mut message = if self.text.is_empty() {
            self.code.message().to_string()
        } else {
            self.text.clone()
        };
        if let Some(cause) = &self.cause {
            if !message.is_empty() {
                message.push_str(": ");
            }
            message.push_str(&cause.to_string());
        }
        message
    }

    pub(crate) fn level_message(&self) -> String {
        if self.text.is_empty() {
            self.full_message()
        } else {
            self.text.clone()
        }
    }
}

impl StdError for Error {
    /// The immediate cause, one level down. This is the traversal primitive
    /// the recursive queries build on.
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(|c| &**c as &(dyn StdError + 'static))
    }
}

/// Whether two error references point at the same object.
pub(crate) fn same_object(a: &(dyn StdError + 'static), b: &(dyn StdError + 'static)) -> bool {
    std::ptr::eq(a as *const _ as *const (), b as *const _ as *const ())
}

/// Builder for errors with explicit parts, including the internal
/// construction path that skips stack capture.
pub struct ErrorBuilder {
    text: String,
    code: Code,
    cause: Option<BoxError>,
    capture_stack: bool,
}

impl ErrorBuilder {
    /// Start with empty text, no code, no cause, stack capture enabled.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            code: Code::NIL,
            cause: None,
            capture_stack: true,
        }
    }

    /// Set the display text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the code.
    pub fn code(mut self, code: Code) -> Self {
        self.code = code;
        self
    }

    /// Set the wrapped cause.
    pub fn cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Control whether a stack is captured at build time.
    pub fn capture_stack(mut self, capture: bool) -> Self {
        self.capture_stack = capture;
        self
    }

    /// Build the error.
    pub fn build(self) -> Error {
        Error {
            cause: self.cause,
            stack: if self.capture_stack {
                Stack::capture(0)
            } else {
                Stack::empty()
            },
            text: self.text,
            code: self.code,
        }
    }
}

impl Default for ErrorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The root cause returned by [`Error::cause`]: either a reference to the
/// external error the chain terminates at, or a text-only error synthesized
/// from the terminal node.
#[derive(Debug)]
pub enum RootCause<'a> {
    /// The chain terminated at an external (non-node) error.
    External(&'a (dyn StdError + 'static)),
    /// The chain terminated at a node without a cause; its text is lifted
    /// into a standalone error.
    Synthesized(PlainError),
}

impl RootCause<'_> {
    /// View the root cause as a plain error reference.
    pub fn as_dyn(&self) -> &(dyn StdError + 'static) {
        match self {
            RootCause::External(err) => *err,
            RootCause::Synthesized(err) => err,
        }
    }
}

impl fmt::Display for RootCause<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_dyn(), f)
    }
}

impl StdError for RootCause<'_> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.as_dyn().source()
    }
}

/// A bare text error, carrying no code, cause, or stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainError {
    text: String,
}

impl PlainError {
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }
}

impl fmt::Display for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl StdError for PlainError {}
