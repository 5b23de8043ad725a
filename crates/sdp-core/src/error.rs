//! Error handling for the session-description layer
//!
//! This module defines the error types that can occur while generating
//! credentials or serializing/parsing negotiation documents.

use thiserror::Error;

/// Result type alias for session-description operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for session-description operations
#[derive(Error, Debug)]
pub enum Error {
    /// A document or attribute value did not match the SDP grammar
    #[error("SDP parsing error: {0}")]
    SdpParsingError(String),

    /// The cryptographically secure random source failed. Fatal: credentials
    /// must never be produced from a non-cryptographic source.
    #[error("credential random source unavailable: {0}")]
    CredentialSourceUnavailable(String),

    /// A credential was requested with a zero entropy budget
    #[error("invalid credential entropy request: {0} bits")]
    InvalidEntropy(u32),
}
