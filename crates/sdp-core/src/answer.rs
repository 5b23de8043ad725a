//! Answer synthesis
//!
//! Builds the fabricated answer document for a predetermined remote
//! endpoint. The answer declares the target as a single host candidate,
//! advertises ICE lite (the remote is assumed to be publicly reachable, RFC
//! 8445) and a passive DTLS role (RFC 5763), and carries the fixed,
//! externally supplied certificate fingerprint; callers never generate
//! their own certificate.
//!
//! The media-description protocol token MUST be the one the committed offer
//! actually requested; a mismatch makes the consuming engine reject the
//! answer silently or stall, which is why the synthesizer receives the
//! protocol instead of deriving it from the target.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::attributes::CandidateAttribute;
use crate::constants::{
    DEFAULT_FINGERPRINT, DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_SCTP_PORT, HOST_CANDIDATE_PRIORITY,
};
use crate::credentials::IceCredentials;
use crate::document::{
    Attribute, ConnectionData, MediaDescription, Origin, SessionDescription, TimeDescription,
    SDP_VERSION,
};
use crate::target::{ConnectionTarget, TransportProtocol};

/// Fixed constants embedded in every synthesized answer.
///
/// The certificate fingerprint and the constant attribute values are one
/// externally configured unit; sessions never vary them individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerConfig {
    /// Fingerprint attribute value, algorithm token included
    /// (e.g. `sha-256 51:3C:...`), of the fixed certificate the remote
    /// presents during the DTLS handshake (RFC 8122)
    pub fingerprint: String,

    /// SCTP association port (`a=sctp-port`, RFC 8841). Not the
    /// transport-layer port from the media line.
    pub sctp_port: u16,

    /// Maximum SCTP user message size in bytes (`a=max-message-size`)
    pub max_message_size: u64,

    /// Priority declared for the fabricated host candidate
    pub candidate_priority: u32,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            fingerprint: DEFAULT_FINGERPRINT.to_string(),
            sctp_port: DEFAULT_SCTP_PORT,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            candidate_priority: HOST_CANDIDATE_PRIORITY,
        }
    }
}

/// Synthesizes a complete answer document.
///
/// `protocol` is the transport the (possibly adjusted) offer committed to;
/// `mid` is the media-section identifier extracted from that offer. The
/// credential pair must be freshly generated for this answer and is
/// independent of the pair written into the offer.
///
/// Deterministic given identical inputs, except for the origin session id
/// (wall clock) and the supplied credentials.
pub fn synthesize_answer(
    target: &ConnectionTarget,
    protocol: TransportProtocol,
    mid: &str,
    credentials: &IceCredentials,
    config: &AnswerConfig,
) -> SessionDescription {
    let candidate = CandidateAttribute::host(
        &target.address,
        target.port,
        protocol.candidate_token(),
        config.candidate_priority,
    );

    SessionDescription {
        version: SDP_VERSION,
        origin: Origin::anonymous(unix_timestamp(), &target.address),
        session_name: "-".to_string(),
        timing: TimeDescription::unbounded(),
        group: Some(format!("BUNDLE {}", mid)),
        media: MediaDescription::datachannel(target.port, protocol.media_proto_token()),
        connection: ConnectionData::new(&target.address),
        attributes: vec![
            Attribute::value("mid", mid),
            // Lite implementation: the target is always assumed to have a
            // publicly reachable address (RFC 8445)
            Attribute::flag("ice-lite"),
            // RFC 8839 semantics, no trickled candidates
            Attribute::value("ice-options", crate::offer::ICE_OPTIONS_NO_TRICKLE),
            Attribute::value("ice-ufrag", &credentials.ufrag),
            Attribute::value("ice-pwd", &credentials.pwd),
            Attribute::value("fingerprint", &config.fingerprint),
            // The remote DTLS server only listens for incoming connections
            // (RFC 5763)
            Attribute::value("setup", "passive"),
            Attribute::value("sctp-port", config.sctp_port.to_string()),
            Attribute::value("max-message-size", config.max_message_size.to_string()),
            Attribute::value("candidate", candidate.to_string()),
        ],
    }
}

fn unix_timestamp() -> u64 {
    // Pre-epoch clocks degrade to 0; the session id only needs to be a
    // plausible numeric value.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
