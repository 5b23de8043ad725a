//! Negotiation sequencing for the rtcdial stack.
//!
//! This crate drives one offer/answer round trip against an external
//! WebRTC engine to dial a predetermined endpoint without any signaling
//! exchange: the engine's offer is rewritten with predictable credentials,
//! committed locally, and the complete answer is fabricated from the known
//! target address rather than received from the remote.
//!
//! The engine itself (ICE, DTLS, SCTP) stays behind the
//! [`NegotiationEngine`] trait; document construction and parsing live in
//! `rtcdial-sdp-core`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rtcdial_peer_core::prelude::*;
//! # use rtcdial_peer_core::{EngineEventReceiver};
//! # async fn dial<E: NegotiationEngine + 'static>(
//! #     engine: Arc<E>,
//! #     mut events: EngineEventReceiver,
//! # ) {
//! let target = ConnectionTarget::new(
//!     "192.168.1.20".parse().unwrap(),
//!     30333,
//!     TransportProtocol::Datagram,
//!     bytes::Bytes::new(),
//! );
//!
//! let mut session = NegotiationSession::new(engine, target, SessionConfig::default());
//! let state = session.run(&mut events).await;
//! assert!(state.is_terminal());
//! # }
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

// Error handling
pub mod error;

// The engine trait and its event stream
pub mod engine;

// Session configuration
pub mod config;

// The negotiation state machine
pub mod session;

// Public exports
pub use config::{SessionConfig, SessionConfigBuilder};
pub use engine::{
    EngineConnectionState, EngineEvent, EngineEventReceiver, EngineEventSender,
    IceConnectionState, NegotiationEngine,
};
pub use error::{Error, Result};
pub use session::{NegotiationSession, SessionState};

// Re-exported so callers can describe targets without naming the document
// crate directly.
pub use rtcdial_sdp_core::{ConnectionTarget, TransportProtocol};

/// Re-export of common types and functions
pub mod prelude {
    pub use super::{
        ConnectionTarget, EngineEvent, NegotiationEngine, NegotiationSession, SessionConfig,
        SessionState, TransportProtocol,
    };
}

/// Dial `target` on a background task with the default configuration.
///
/// Fire-and-forget variant of [`NegotiationSession::run`]; the returned
/// handle resolves to the terminal state.
pub fn connect<E>(
    engine: Arc<E>,
    events: EngineEventReceiver,
    target: ConnectionTarget,
) -> JoinHandle<SessionState>
where
    E: NegotiationEngine + 'static,
{
    connect_with_config(engine, events, target, SessionConfig::default())
}

/// Dial `target` on a background task with an explicit configuration
pub fn connect_with_config<E>(
    engine: Arc<E>,
    mut events: EngineEventReceiver,
    target: ConnectionTarget,
    config: SessionConfig,
) -> JoinHandle<SessionState>
where
    E: NegotiationEngine + 'static,
{
    tokio::spawn(async move {
        let mut session = NegotiationSession::new(engine, target, config);
        let state = session.run(&mut events).await;
        match state {
            SessionState::ChannelOpen => info!("negotiation finished: {}", state),
            other => error!("negotiation finished: {}", other),
        }
        state
    })
}
