//! # Causeway Code
//!
//! Universal error code definitions for the Causeway error chain.
//!
//! A [`Code`] pairs an integer value with a brief message and an optional
//! structured detail payload. Codes travel alongside error text through a
//! chain of wrapped errors and are looked up lazily: a chain level without
//! its own code defers to the nearest ancestor that carries one.
//!
//! ## Reserved codes
//!
//! Values below 1000 are reserved for the common codes defined on [`Code`]
//! (for example [`Code::NOT_FOUND`] or [`Code::INVALID_PARAMETER`]).
//! Applications define their own codes with [`Code::new`] using values of
//! 1000 and above.

pub mod code;

pub use code::Code;
