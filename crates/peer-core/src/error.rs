//! Error handling for negotiation sessions

use thiserror::Error;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for negotiation sessions.
///
/// Every asynchronous engine failure is caught at the point of use and
/// translated into a `Failed` state transition; none of these escape the
/// session boundary uncaught.
#[derive(Error, Debug)]
pub enum Error {
    /// The engine rejected an asynchronous operation (offer creation or a
    /// description commit). Fatal to the session; no retry is attempted.
    #[error("engine rejected {operation}: {reason}")]
    EngineOperationRejected {
        /// Which engine operation failed
        operation: &'static str,
        /// Engine-reported reason
        reason: String,
    },

    /// The data channel reported an error
    #[error("data channel error: {0}")]
    ChannelError(String),

    /// The engine closed the owning connection
    #[error("connection closed by the engine")]
    ConnectionClosed,

    /// The engine violated the negotiation lifecycle (e.g. a second
    /// negotiation-needed signal while a round trip is in flight)
    #[error("engine protocol violation: {0}")]
    ProtocolViolation(String),

    /// Document or credential error from the session-description layer
    #[error(transparent)]
    Sdp(#[from] rtcdial_sdp_core::Error),
}

impl Error {
    /// Helper for wrapping engine-reported failures with the operation name
    pub fn rejected(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::EngineOperationRejected {
            operation,
            reason: reason.into(),
        }
    }
}
