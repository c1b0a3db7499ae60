//! Error types for boilersieve.
//!
//! Only structural precondition failures are errors. Heuristic ambiguity
//! (no title match, no confident candidate, aggressive pruning) always
//! degrades to *some* extracted text and is never surfaced here.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The supplied forest carries no recognizable document root: neither a
    /// top-level `html` element with children nor a single top-level element.
    #[error("no document root element found: {0}")]
    InvalidInput(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
