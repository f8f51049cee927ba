//! Chain fixtures and helpers.
//!
//! Common setup code for tests that need chains of known shape.

use causeway::Error;
use causeway_code::Code;
use thiserror::Error as ThisError;

/// External error types used as chain termini in tests.
#[derive(Debug, ThisError)]
pub enum FixtureError {
    #[error("disk offline")]
    DiskOffline,

    #[error("record {0} missing")]
    RecordMissing(u64),

    #[error("backend unavailable: {reason}")]
    BackendUnavailable { reason: String },
}

/// Build a pure chain of `depth` levels, outermost last: the innermost
/// level reads `level 1`, the outermost `level <depth>`.
///
/// `depth` must be at least 1.
pub fn nested_chain(depth: usize) -> Error {
    assert!(depth >= 1, "a chain has at least one level");
    let mut err = Error::new("level 1");
    for level in 2..=depth {
        err = Error::wrap(Some(err), format!("level {}", level)).expect("cause is present");
    }
    err
}

/// Build a chain of `depth` node levels over a [`FixtureError`] terminus.
pub fn chain_over_external(depth: usize, terminus: FixtureError) -> Error {
    assert!(depth >= 1, "a chain has at least one level");
    let mut err = Error::wrap(Some(terminus), "level 1").expect("cause is present");
    for level in 2..=depth {
        err = Error::wrap(Some(err), format!("level {}", level)).expect("cause is present");
    }
    err
}

/// Build a chain whose innermost level carries `code`, with `plain_levels`
/// code-less levels wrapped above it.
pub fn coded_chain(code: Code, plain_levels: usize) -> Error {
    let mut err = Error::new_code(code, "coded origin");
    for level in 1..=plain_levels {
        err = Error::wrap(Some(err), format!("plain {}", level)).expect("cause is present");
    }
    err
}
