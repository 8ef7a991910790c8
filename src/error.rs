//! Error types for the tesauro library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TesauroError`] enum. Lookup misses and ambiguous terms are not errors:
//! they are reported as data in an
//! [`ExpansionResult`](crate::expansion::ExpansionResult).
//!
//! # Examples
//!
//! ```
//! use tesauro::error::{Result, TesauroError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TesauroError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for tesauro operations.
#[derive(Error, Debug)]
pub enum TesauroError {
    /// I/O errors (reading sources, writing artifacts)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// A source file could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The concept map and inverted index disagree with each other
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A persisted structure breaks one of its format rules
    #[error("Malformed structure: {0}")]
    MalformedStructure(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Decoding failures raised with `anyhow!`
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TesauroError.
pub type Result<T> = std::result::Result<T, TesauroError>;

impl TesauroError {
    /// Create a new CSV error.
    pub fn csv<S: Into<String>>(msg: S) -> Self {
        TesauroError::Csv(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        TesauroError::Parse(msg.into())
    }

    /// Create a new invariant violation error.
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        TesauroError::InvariantViolation(msg.into())
    }

    /// Create a new malformed structure error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        TesauroError::MalformedStructure(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TesauroError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TesauroError::Other(msg.into())
    }

    /// Whether this error means the persisted structures cannot be trusted.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            TesauroError::InvariantViolation(_) | TesauroError::MalformedStructure(_)
        )
    }
}

impl From<csv::Error> for TesauroError {
    fn from(err: csv::Error) -> Self {
        TesauroError::Csv(err.to_string())
    }
}
