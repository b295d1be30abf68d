//! Error types for styled-assert setup.
//!
//! Assertions never fail with an `Error`: a missing rule or a value mismatch is
//! reported through [`MatchResult`](crate::MatchResult). These errors only
//! surface while wiring a matcher to its styling engine.

use thiserror::Error;

/// Errors that can occur while setting up a matcher.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Styling engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
