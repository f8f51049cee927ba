//! # Causeway Testkit
//!
//! Testing utilities for the Causeway error chain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: helpers that build chains of known shape, plus a small
//!   set of external error types to use as chain termini
//! - **Generators**: proptest strategies for codes, texts, and whole chains
//!
//! ## Fixtures
//!
//! ```rust
//! use causeway_testkit::fixtures::nested_chain;
//!
//! let err = nested_chain(3);
//! assert_eq!(err.to_string(), "level 3: level 2: level 1");
//! ```
//!
//! ## Property testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use causeway_testkit::generators;
//!
//! proptest! {
//!     #[test]
//!     fn rendering_never_panics(err in generators::chain(5)) {
//!         let _ = err.to_string();
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{chain_over_external, coded_chain, nested_chain, FixtureError};
