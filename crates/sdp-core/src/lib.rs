//! Session-description synthesis and parsing for the rtcdial stack.
//!
//! This crate owns the negotiation-document side of dialing a predetermined
//! WebRTC endpoint without a real signaling exchange:
//!
//! - [`credentials`] generates random ICE ufrag/pwd pairs from an injected
//!   cryptographically secure source;
//! - [`document`] is the typed document model whose `Display` impl enforces
//!   the fixed line order and the mandatory trailing line feed;
//! - [`parser`] parses externally produced documents back into the model,
//!   preserving unknown attributes opaquely;
//! - [`offer`] rewrites a host-generated offer so its credentials are
//!   predictable and trickling is disabled;
//! - [`answer`] fabricates the complete answer declaring the target as a
//!   host candidate.
//!
//! Sequencing these pieces against a negotiation engine lives in
//! `rtcdial-peer-core`.

// Error handling
pub mod error;

// Connection targets and transport protocol tokens
pub mod target;

// ICE credential generation
pub mod credentials;

// Typed attribute parsing/formatting
pub mod attributes;

// Document model and serialization
pub mod document;

// Document parsing
pub mod parser;

// Offer adjustment
pub mod offer;

// Answer synthesis
pub mod answer;

// Public exports
pub use answer::{synthesize_answer, AnswerConfig};
pub use attributes::CandidateAttribute;
pub use credentials::{generate_payload, IceCredentials};
pub use document::{
    Attribute, ConnectionData, MediaDescription, Origin, SessionDescription, TimeDescription,
};
pub use error::{Error, Result};
pub use offer::{adjust_offer, AdjustmentOutcome};
pub use parser::parse_session_description;
pub use target::{ConnectionTarget, TransportProtocol};

/// Re-export of common types and functions
pub mod prelude {
    pub use super::{
        adjust_offer, parse_session_description, synthesize_answer, AdjustmentOutcome,
        AnswerConfig, Attribute, ConnectionTarget, Error, IceCredentials, Result,
        SessionDescription, TransportProtocol,
    };
}

/// Wire-format constants shared by all sessions
pub mod constants {
    /// Format token for WebRTC data channels (RFC 8841)
    pub const WEBRTC_DATACHANNEL_FORMAT: &str = "webrtc-datachannel";

    /// SCTP association port declared in fabricated answers
    pub const DEFAULT_SCTP_PORT: u16 = 5000;

    /// Maximum SCTP user message size declared in fabricated answers (bytes)
    pub const DEFAULT_MAX_MESSAGE_SIZE: u64 = 100_000;

    /// Priority of the single fabricated host candidate
    pub const HOST_CANDIDATE_PRIORITY: u32 = 2_113_667_327;

    /// Fingerprint of the fixed, publicly known certificate every remote
    /// presents during its DTLS handshake. The DTLS layer therefore offers
    /// no protection on its own; an additional encryption layer is
    /// negotiated on top of the data channel.
    pub const DEFAULT_FINGERPRINT: &str = "sha-256 51:3C:68:8D:CD:62:7C:0B:CC:B7:C9:E2:EB:6C:13:98:9A:C9:82:75:5A:3B:40:BC:4E:42:DE:B5:5A:D0:09:B2";
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use rand::rngs::OsRng;

    #[test]
    fn offer_to_answer_flow() {
        let offer = "v=0\n\
            o=- 1 2 IN IP4 127.0.0.1\n\
            s=-\n\
            t=0 0\n\
            m=application 9 TCP/DTLS/SCTP webrtc-datachannel\n\
            c=IN IP4 0.0.0.0\n\
            a=ice-ufrag:orig\n\
            a=ice-pwd:origpwdorigpwdorigpwd\n\
            a=ice-options:trickle\n\
            a=mid:0\n";

        let offer_creds = IceCredentials::new("V6j+", "OEKutPgoHVk/99FfqPOf444w");
        let (adjusted, outcome) = adjust_offer(offer, &offer_creds);
        assert!(outcome.is_complete());

        let parsed = parse_session_description(&adjusted).unwrap();
        let protocol = TransportProtocol::from_media_proto_token(&parsed.media.proto).unwrap();
        assert_eq!(protocol, TransportProtocol::Stream);

        let target = ConnectionTarget::new(
            "10.0.0.5".parse().unwrap(),
            9001,
            TransportProtocol::Stream,
            Bytes::new(),
        );
        let answer_creds = IceCredentials::generate(&mut OsRng).unwrap();
        let answer = synthesize_answer(
            &target,
            protocol,
            parsed.mid().unwrap_or("0"),
            &answer_creds,
            &AnswerConfig::default(),
        );

        // The answer follows the offer's transport shape and never reuses
        // the offer-side credential pair.
        assert_eq!(answer.media.proto, parsed.media.proto);
        assert_ne!(answer.ice_ufrag(), parsed.ice_ufrag());
        assert_ne!(answer.ice_pwd(), parsed.ice_pwd());
    }
}
