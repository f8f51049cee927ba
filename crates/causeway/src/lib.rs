//! # Causeway
//!
//! Error chains with per-level stack capture, filtered trace rendering,
//! and error codes.
//!
//! ## Overview
//!
//! Every [`Error`] records a display text, an optional [`Code`], an
//! optional cause, and a stack snapshot taken at construction. Wrapping an
//! error adds a level to the chain; queries walk the chain backward:
//!
//! - [`Error::code`] — the nearest code in the chain (lazy inheritance)
//! - [`Error::cause`] — the chain's root cause
//! - [`Error::current`] — this level alone, detached
//! - [`Error::is`] / [`Error::equal`] — membership and shallow equality
//! - [`Error::stack`] — the multi-level, deduplicated stack dump
//!
//! ## Usage
//!
//! ```rust
//! use causeway::{Code, Error};
//!
//! fn read_config() -> causeway::Result<()> {
//!     Err(Error::new_code(Code::MISSING_CONFIGURATION, "config file absent"))
//! }
//!
//! let err = Error::wrap(read_config().err(), "starting service").unwrap();
//! assert_eq!(err.to_string(), "starting service: config file absent");
//! assert_eq!(err.code(), &Code::MISSING_CONFIGURATION);
//! ```
//!
//! Wrapping `None` is `None`, so propagation code wraps unconditionally.
//!
//! ## Stack traces
//!
//! Production logs stay terse: `{}` prints the flattened message. For
//! diagnostics, `{:+}` prints the filtered, deduplicated stack dump and
//! `{:+?}` prints message and dump together:
//!
//! ```rust,no_run
//! use causeway::{configure_from_env, Error};
//!
//! // Once, at the application entry point.
//! let _ = configure_from_env();
//!
//! let err = Error::wrap(Some(Error::new("disk offline")), "saving order").unwrap();
//! eprintln!("{:+?}", err);
//! ```

pub mod chain;
mod command;
pub mod config;
pub mod ext;
mod format;
mod json;
pub mod query;
mod stack;
pub mod traits;

// Re-export the code crate's type; codes and chains travel together.
pub use causeway_code::Code;

pub use chain::{BoxError, Error, ErrorBuilder, PlainError, RootCause};
pub use config::{
    configure, configure_from_env, StackConfig, StackMode, DEFAULT_STACK_FILTER_KEY,
    OPTION_KEY_BRIEF, OPTION_KEY_STACK_MODE,
};
pub use ext::ResultExt;
pub use query::{cause, code, current, equal, has_code, has_stack, is, stack, unwrapped};
pub use traits::{Caused, Coded, Leveled, Stacked};

/// Result alias for fallible operations that produce chain errors.
pub type Result<T> = std::result::Result<T, Error>;
