//! Top-level error type for the driver binary.
//!
//! Every fallible operation in `nookc` bottoms out in one of these
//! variants so `main` can match on a single `Result<(), NookError>` and
//! print a uniform `error: {0}` line before exiting 1.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NookError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A source file failed to parse, or (when run non-interactively)
    /// evaluated to a runtime error. Either way the user sees a single
    /// line and the process exits 1.
    #[error("{0}")]
    Parse(String),
}
