//! Connection targets
//!
//! A [`ConnectionTarget`] describes the predetermined remote endpoint a
//! session dials: its IP address, transport-layer port and protocol, and an
//! opaque identity blob that higher layers use to authenticate the peer once
//! the channel is open.

use std::fmt;
use std::net::IpAddr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Transport-layer protocol carried underneath DTLS/SCTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportProtocol {
    /// Stream-oriented transport (TCP)
    Stream,

    /// Datagram-oriented transport (UDP)
    Datagram,
}

impl TransportProtocol {
    /// Protocol token used in the media description line (RFC 8841)
    pub fn media_proto_token(&self) -> &'static str {
        match self {
            Self::Stream => "TCP/DTLS/SCTP",
            Self::Datagram => "UDP/DTLS/SCTP",
        }
    }

    /// Transport token used in candidate lines (RFC 8839)
    pub fn candidate_token(&self) -> &'static str {
        match self {
            Self::Stream => "TCP",
            Self::Datagram => "UDP",
        }
    }

    /// Maps a media-description protocol token back to the transport choice.
    ///
    /// Returns `None` for tokens this stack does not negotiate (e.g. plain
    /// RTP profiles).
    pub fn from_media_proto_token(token: &str) -> Option<Self> {
        match token {
            "TCP/DTLS/SCTP" => Some(Self::Stream),
            "UDP/DTLS/SCTP" => Some(Self::Datagram),
            _ => None,
        }
    }
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_proto_token())
    }
}

/// The remote endpoint one negotiation session connects to.
///
/// Immutable for the lifetime of a session; owned by the caller and only
/// read by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    /// IP address the fabricated answer declares as the remote candidate
    pub address: IpAddr,

    /// Transport-layer port of the remote endpoint
    pub port: u16,

    /// Stream- or datagram-oriented transport
    pub protocol: TransportProtocol,

    /// Opaque remote identity (e.g. a peer id); not interpreted here
    pub remote_identity: Bytes,
}

impl ConnectionTarget {
    /// Create a new connection target
    pub fn new(
        address: IpAddr,
        port: u16,
        protocol: TransportProtocol,
        remote_identity: Bytes,
    ) -> Self {
        Self {
            address,
            port,
            protocol,
            remote_identity,
        }
    }

    /// SDP address type token for this target (`IP4` or `IP6`)
    pub fn addr_type(&self) -> &'static str {
        match self.address {
            IpAddr::V4(_) => "IP4",
            IpAddr::V6(_) => "IP6",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_proto_tokens() {
        assert_eq!(TransportProtocol::Stream.media_proto_token(), "TCP/DTLS/SCTP");
        assert_eq!(TransportProtocol::Datagram.media_proto_token(), "UDP/DTLS/SCTP");
        assert_eq!(TransportProtocol::Stream.candidate_token(), "TCP");
        assert_eq!(TransportProtocol::Datagram.candidate_token(), "UDP");
    }

    #[test]
    fn test_proto_token_round_trip() {
        for proto in [TransportProtocol::Stream, TransportProtocol::Datagram] {
            assert_eq!(
                TransportProtocol::from_media_proto_token(proto.media_proto_token()),
                Some(proto)
            );
        }
        assert_eq!(TransportProtocol::from_media_proto_token("RTP/AVP"), None);
        assert_eq!(TransportProtocol::from_media_proto_token("udp/dtls/sctp"), None);
    }

    #[test]
    fn test_addr_type() {
        let v4 = ConnectionTarget::new(
            "10.0.0.5".parse().unwrap(),
            9001,
            TransportProtocol::Stream,
            Bytes::new(),
        );
        assert_eq!(v4.addr_type(), "IP4");

        let v6 = ConnectionTarget::new(
            "2001:db8::1".parse().unwrap(),
            9001,
            TransportProtocol::Datagram,
            Bytes::new(),
        );
        assert_eq!(v6.addr_type(), "IP6");
    }
}
