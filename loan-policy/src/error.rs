//! Error types for the loan policy engine

use thiserror::Error;

/// Loan policy error
#[derive(Debug, Error)]
pub enum Error {
    /// Policy table violates a structural rule
    #[error("Invalid policy table: {0}")]
    InvalidPolicy(String),

    /// No built-in rule set for the requested version
    #[error("Unknown policy version: {0}")]
    UnknownPolicyVersion(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
