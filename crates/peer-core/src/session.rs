//! Negotiation session state machine
//!
//! Sequences one offer/answer round trip against the external engine:
//! request a data channel, adjust and commit the host-generated offer,
//! fabricate and commit the answer, then wait for the channel to open.
//! Exactly one round trip happens per session; no renegotiation is possible
//! in the fabricated-answer model, so every failure is terminal and a new
//! connection attempt needs a brand-new session.
//!
//! All work is event-driven: the session suspends only on the three
//! asynchronous engine operations and on the engine's event channel.
//! Concurrent sessions are fully independent and share no state, including
//! credentials.

use std::fmt;
use std::sync::Arc;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, error, info, warn};

use rtcdial_sdp_core::{
    adjust_offer, parse_session_description, synthesize_answer, ConnectionTarget, IceCredentials,
    SessionDescription, TransportProtocol,
};

use crate::config::SessionConfig;
use crate::engine::{
    EngineConnectionState, EngineEvent, EngineEventReceiver, NegotiationEngine,
};
use crate::error::{Error, Result};

/// Negotiation session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, waiting for the negotiation-needed signal
    Idle,

    /// Negotiation-needed received, offer being created and adjusted
    OfferPending,

    /// Adjusted offer committed as the local description
    OfferCommitted,

    /// Fabricated answer committed as the remote description
    AnswerCommitted,

    /// Data channel open; negotiation succeeded (terminal)
    ChannelOpen,

    /// Negotiation failed (terminal)
    Failed,
}

impl SessionState {
    /// True for the two terminal states
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ChannelOpen | Self::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::OfferPending => write!(f, "offer-pending"),
            Self::OfferCommitted => write!(f, "offer-committed"),
            Self::AnswerCommitted => write!(f, "answer-committed"),
            Self::ChannelOpen => write!(f, "channel-open"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// One negotiation session against an external engine.
///
/// Owns the documents it produces; reads the caller-owned target. Generic
/// over the random source so credential generation is testable with a
/// deterministic substitute; production code uses the [`OsRng`] default.
pub struct NegotiationSession<E, R = OsRng> {
    engine: Arc<E>,
    target: ConnectionTarget,
    config: SessionConfig,
    state: SessionState,
    rng: R,
    local_description: Option<String>,
    remote_description: Option<SessionDescription>,
    last_error: Option<Error>,
}

impl<E> NegotiationSession<E, OsRng>
where
    E: NegotiationEngine,
{
    /// Create a session using the operating system's secure random source
    pub fn new(engine: Arc<E>, target: ConnectionTarget, config: SessionConfig) -> Self {
        Self::with_rng(engine, target, config, OsRng)
    }
}

impl<E, R> NegotiationSession<E, R>
where
    E: NegotiationEngine,
    R: RngCore + CryptoRng,
{
    /// Create a session with an explicitly injected random source
    pub fn with_rng(engine: Arc<E>, target: ConnectionTarget, config: SessionConfig, rng: R) -> Self {
        Self {
            engine,
            target,
            config,
            state: SessionState::Idle,
            rng,
            local_description: None,
            remote_description: None,
            last_error: None,
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The adjusted offer committed as the local description, if any
    pub fn local_description(&self) -> Option<&str> {
        self.local_description.as_deref()
    }

    /// The fabricated answer committed as the remote description, if any
    pub fn remote_description(&self) -> Option<&SessionDescription> {
        self.remote_description.as_ref()
    }

    /// The error that moved the session to `Failed`, if any
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Drives the session to a terminal state.
    ///
    /// Requests the data channel (which makes the engine signal
    /// negotiation-needed) and then processes engine events until the
    /// channel opens or the session fails.
    pub async fn run(&mut self, events: &mut EngineEventReceiver) -> SessionState {
        info!(
            "dialing {}:{} over {}",
            self.target.address, self.target.port, self.target.protocol
        );

        if let Err(error) = self
            .engine
            .create_data_channel(
                &self.config.channel_label,
                self.config.channel_ordered,
                self.config.negotiation_id,
            )
            .await
        {
            self.fail(error);
            return self.state;
        }

        while !self.state.is_terminal() {
            match events.recv().await {
                Some(event) => self.handle_event(event).await,
                None => self.fail(Error::ConnectionClosed),
            }
        }
        self.state
    }

    async fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::NegotiationNeeded => {
                if self.state != SessionState::Idle {
                    // At most one round trip per session; a repeat signal
                    // means the engine went off-script.
                    self.fail(Error::ProtocolViolation(format!(
                        "negotiation-needed while {}",
                        self.state
                    )));
                    return;
                }
                self.set_state(SessionState::OfferPending);
                if let Err(error) = self.negotiate().await {
                    self.fail(error);
                }
            }
            EngineEvent::ConnectionStateChanged(state) => {
                info!("connection state: {}", state);
                match state {
                    EngineConnectionState::Failed => {
                        self.fail(Error::ChannelError("peer connection failed".to_string()));
                    }
                    EngineConnectionState::Closed => self.fail(Error::ConnectionClosed),
                    _ => {}
                }
            }
            EngineEvent::IceConnectionStateChanged(state) => {
                info!("ICE connection state: {}", state);
            }
            EngineEvent::ChannelOpen => {
                if self.state == SessionState::AnswerCommitted {
                    info!("data channel open");
                    self.set_state(SessionState::ChannelOpen);
                } else {
                    // The channel cannot open before the fabricated answer
                    // is committed.
                    self.fail(Error::ProtocolViolation(format!(
                        "channel opened while {}",
                        self.state
                    )));
                }
            }
            EngineEvent::ChannelError(reason) => {
                self.fail(Error::ChannelError(reason));
            }
            EngineEvent::Closed => {
                self.fail(Error::ConnectionClosed);
            }
        }
    }

    /// One complete offer/answer round trip
    async fn negotiate(&mut self) -> Result<()> {
        let offer = match self.engine.create_offer().await {
            Ok(offer) => offer,
            Err(error) => {
                error!("create_offer rejected: {}", error);
                return Err(error);
            }
        };

        let (adjusted, outcome) = adjust_offer(&offer, &self.config.offer_credentials);
        if !outcome.ufrag_replaced {
            warn!("offer carries no ice-ufrag line; leaving credentials untouched");
        }
        if !outcome.pwd_replaced {
            warn!("offer carries no ice-pwd line; leaving credentials untouched");
        }
        if !outcome.options_replaced {
            warn!("offer carries no ice-options line; trickling stays enabled");
        }

        if let Err(error) = self.engine.set_local_description(&adjusted).await {
            error!("set_local_description rejected: {}", error);
            return Err(error);
        }
        self.set_state(SessionState::OfferCommitted);

        // The answer must declare the protocol the committed offer actually
        // requested, not the one the caller asked for.
        let (protocol, mid) = self.offered_protocol_and_mid(&adjusted);
        self.local_description = Some(adjusted);

        let credentials = IceCredentials::generate(&mut self.rng)?;
        let answer = synthesize_answer(
            &self.target,
            protocol,
            &mid,
            &credentials,
            &self.config.answer,
        );
        let answer_text = answer.to_string();
        debug!("fabricated answer:\n{}", answer_text);

        if let Err(error) = self.engine.set_remote_description(&answer_text).await {
            error!("set_remote_description rejected: {}", error);
            return Err(error);
        }
        self.remote_description = Some(answer);
        self.set_state(SessionState::AnswerCommitted);
        Ok(())
    }

    fn offered_protocol_and_mid(&self, adjusted: &str) -> (TransportProtocol, String) {
        match parse_session_description(adjusted) {
            Ok(offer) => {
                let mid = offer.mid().unwrap_or("0").to_string();
                match TransportProtocol::from_media_proto_token(&offer.media.proto) {
                    Some(protocol) => (protocol, mid),
                    None => {
                        warn!(
                            "offer committed unrecognized protocol token {:?}; \
                             falling back to requested {}",
                            offer.media.proto, self.target.protocol
                        );
                        (self.target.protocol, mid)
                    }
                }
            }
            Err(error) => {
                warn!(
                    "committed offer could not be parsed ({}); \
                     falling back to requested protocol",
                    error
                );
                (self.target.protocol, "0".to_string())
            }
        }
    }

    fn set_state(&mut self, new_state: SessionState) {
        if self.state != new_state {
            debug!("session state: {} -> {}", self.state, new_state);
            self.state = new_state;
        }
    }

    fn fail(&mut self, error: Error) {
        error!("negotiation failed in state {}: {}", self.state, error);
        self.last_error = Some(error);
        self.set_state(SessionState::Failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::OfferPending.to_string(), "offer-pending");
        assert_eq!(SessionState::OfferCommitted.to_string(), "offer-committed");
        assert_eq!(SessionState::AnswerCommitted.to_string(), "answer-committed");
        assert_eq!(SessionState::ChannelOpen.to_string(), "channel-open");
        assert_eq!(SessionState::Failed.to_string(), "failed");
    }

    #[test]
    fn test_terminal_states() {
        assert!(SessionState::ChannelOpen.is_terminal());
        assert!(SessionState::Failed.is_terminal());
        assert!(!SessionState::Idle.is_terminal());
        assert!(!SessionState::OfferPending.is_terminal());
        assert!(!SessionState::OfferCommitted.is_terminal());
        assert!(!SessionState::AnswerCommitted.is_terminal());
    }
}
