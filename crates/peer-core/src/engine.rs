//! The external negotiation engine boundary
//!
//! The underlying ICE/DTLS/SCTP machinery is an opaque capability: it
//! accepts documents, produces connectivity events, and is never
//! implemented here. [`NegotiationEngine`] captures the four operations the
//! session drives, and [`EngineEvent`] the signals it reacts to. Engine
//! signals arrive over a `tokio::sync::mpsc` channel so session logic stays
//! decoupled from any particular engine-API calling convention.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;

/// Peer-connection state reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineConnectionState {
    /// Initial state
    New,
    /// Transport/DTLS handshake in progress
    Connecting,
    /// Connection established
    Connected,
    /// Connection lost, may recover
    Disconnected,
    /// Connection failed
    Failed,
    /// Connection closed
    Closed,
}

impl fmt::Display for EngineConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Failed => write!(f, "failed"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// ICE connection state reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IceConnectionState {
    /// Initial state
    New,
    /// Connectivity checks in progress
    Checking,
    /// A usable pair was found
    Connected,
    /// Checks finished
    Completed,
    /// Connectivity lost
    Disconnected,
    /// All checks failed
    Failed,
    /// Agent shut down
    Closed,
}

impl fmt::Display for IceConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Checking => write!(f, "checking"),
            Self::Connected => write!(f, "connected"),
            Self::Completed => write!(f, "completed"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Failed => write!(f, "failed"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Signals emitted by the negotiation engine
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A data-channel request requires a new offer/answer round trip
    NegotiationNeeded,

    /// Peer-connection state change (logged; `failed`/`closed` are terminal)
    ConnectionStateChanged(EngineConnectionState),

    /// ICE connection state change (logged only)
    IceConnectionStateChanged(IceConnectionState),

    /// The data channel opened; negotiation succeeded
    ChannelOpen,

    /// The data channel reported an error; fatal to the session
    ChannelError(String),

    /// The owning connection was closed from the engine's side
    Closed,
}

/// Receiving half of an engine's event stream
pub type EngineEventReceiver = mpsc::Receiver<EngineEvent>;

/// Sending half of an engine's event stream
pub type EngineEventSender = mpsc::Sender<EngineEvent>;

/// The four asynchronous operations a session drives on the engine.
///
/// All operations may be rejected; the session translates any rejection
/// into a `Failed` transition.
#[async_trait]
pub trait NegotiationEngine: Send + Sync {
    /// Request a data channel. Triggers a negotiation-needed signal.
    async fn create_data_channel(
        &self,
        label: &str,
        ordered: bool,
        negotiation_id: Option<u16>,
    ) -> Result<()>;

    /// Ask the engine to generate an offer document
    async fn create_offer(&self) -> Result<String>;

    /// Commit a document as the local description
    async fn set_local_description(&self, sdp: &str) -> Result<()>;

    /// Commit a document as the remote description
    async fn set_remote_description(&self, sdp: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(EngineConnectionState::Connecting.to_string(), "connecting");
        assert_eq!(EngineConnectionState::Failed.to_string(), "failed");
        assert_eq!(IceConnectionState::Checking.to_string(), "checking");
        assert_eq!(IceConnectionState::Completed.to_string(), "completed");
    }
}
