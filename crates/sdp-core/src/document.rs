//! Typed negotiation documents
//!
//! Structured representation of a session-description document (RFC 8866)
//! restricted to the single data-channel use case: session-level fields,
//! exactly one media description, and an ordered attribute list.
//!
//! Serialization goes through [`fmt::Display`]; every line is emitted with
//! `writeln!`, so the document always ends with a line feed. Some consuming
//! engines reject a description without the trailing line feed, which makes
//! it a hard requirement of the wire format rather than a style choice.
//! Field order is fixed: version, origin, session name, timing, group
//! attribute, media description, connection line, then all remaining
//! attributes in declaration order.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// SDP protocol version. Always 0. (RFC 8866)
pub const SDP_VERSION: u8 = 0;

/// Origin line (`o=`) fields
///
/// Format: `o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Login of the originating user, or `-` when anonymous
    pub username: String,
    /// Session identifier, numeric string
    pub sess_id: String,
    /// Session version, numeric string
    pub sess_version: String,
    /// Network type, always `IN` (Internet)
    pub net_type: String,
    /// Address type, `IP4` or `IP6`
    pub addr_type: String,
    /// Unicast address of the session originator
    pub unicast_address: String,
}

impl Origin {
    /// Anonymous origin (`-` username, version 0) for the given address.
    ///
    /// RFC 8866 allows dummy values for the username, which keeps the
    /// fabricated answer from leaking anything about the local host.
    pub fn anonymous(sess_id: u64, address: &IpAddr) -> Self {
        Self {
            username: "-".to_string(),
            sess_id: sess_id.to_string(),
            sess_version: "0".to_string(),
            net_type: "IN".to_string(),
            addr_type: addr_type_token(address).to_string(),
            unicast_address: address.to_string(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.username,
            self.sess_id,
            self.sess_version,
            self.net_type,
            self.addr_type,
            self.unicast_address
        )
    }
}

/// Connection line (`c=`) fields
///
/// Format: `c=<nettype> <addrtype> <connection-address>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionData {
    /// Network type, always `IN`
    pub net_type: String,
    /// Address type, `IP4` or `IP6`
    pub addr_type: String,
    /// Connection address
    pub connection_address: String,
}

impl ConnectionData {
    /// Connection data pointing at the given address
    pub fn new(address: &IpAddr) -> Self {
        Self {
            net_type: "IN".to_string(),
            addr_type: addr_type_token(address).to_string(),
            connection_address: address.to_string(),
        }
    }
}

impl fmt::Display for ConnectionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.net_type, self.addr_type, self.connection_address
        )
    }
}

/// Timing line (`t=`) fields. `0 0` means the session never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDescription {
    /// Session start time (NTP seconds), 0 for unbounded
    pub start: u64,
    /// Session stop time (NTP seconds), 0 for unbounded
    pub stop: u64,
}

impl TimeDescription {
    /// Timing that never expires (`t=0 0`)
    pub fn unbounded() -> Self {
        Self { start: 0, stop: 0 }
    }
}

impl fmt::Display for TimeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start, self.stop)
    }
}

/// Media description line (`m=`) fields
///
/// Format: `m=<media> <port> <proto> <fmt> ...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescription {
    /// Media type; `application` for data channels
    pub media: String,
    /// Port of the underlying transport-layer protocol. Distinct from the
    /// SCTP port carried in `a=sctp-port`.
    pub port: u16,
    /// Transport protocol token, e.g. `UDP/DTLS/SCTP`
    pub proto: String,
    /// Format descriptions; `webrtc-datachannel` for data channels
    pub formats: Vec<String>,
}

impl MediaDescription {
    /// Data-channel media description (`m=application <port> <proto> webrtc-datachannel`)
    pub fn datachannel(port: u16, proto_token: &str) -> Self {
        Self {
            media: "application".to_string(),
            port,
            proto: proto_token.to_string(),
            formats: vec![crate::constants::WEBRTC_DATACHANNEL_FORMAT.to_string()],
        }
    }
}

impl fmt::Display for MediaDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.media, self.port, self.proto)?;
        for format in &self.formats {
            write!(f, " {}", format)?;
        }
        Ok(())
    }
}

/// A single `a=` attribute: either a `key:value` pair or a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name
    pub key: String,
    /// Attribute value; `None` for flag attributes such as `ice-lite`
    pub value: Option<String>,
}

impl Attribute {
    /// Value attribute (`a=key:value`)
    pub fn value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Flag attribute (`a=key`)
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}:{}", self.key, value),
            None => f.write_str(&self.key),
        }
    }
}

/// A complete negotiation document (offer or answer).
///
/// Invariant: exactly one media description. Owned exclusively by the
/// session that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    /// Protocol version (`v=`), always 0
    pub version: u8,
    /// Origin (`o=`)
    pub origin: Origin,
    /// Session name (`s=`), `-` when unnamed
    pub session_name: String,
    /// Timing (`t=`)
    pub timing: TimeDescription,
    /// Value of the `a=group` attribute, if any (e.g. `BUNDLE 0`)
    pub group: Option<String>,
    /// The single media description (`m=`)
    pub media: MediaDescription,
    /// Connection information (`c=`)
    pub connection: ConnectionData,
    /// Remaining attributes, in serialization order. Unknown attributes
    /// survive a parse/serialize cycle verbatim.
    pub attributes: Vec<Attribute>,
}

impl SessionDescription {
    /// Look up the first attribute with the given key
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key == key)
    }

    /// Look up the value of the first `key:value` attribute with the given key
    pub fn attribute_value(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(|a| a.value.as_deref())
    }

    /// Media-section identifier (`a=mid`), if present
    pub fn mid(&self) -> Option<&str> {
        self.attribute_value("mid")
    }

    /// ICE username fragment (`a=ice-ufrag`), if present
    pub fn ice_ufrag(&self) -> Option<&str> {
        self.attribute_value("ice-ufrag")
    }

    /// ICE password (`a=ice-pwd`), if present
    pub fn ice_pwd(&self) -> Option<&str> {
        self.attribute_value("ice-pwd")
    }

    /// Append an attribute, preserving declaration order
    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }
}

impl fmt::Display for SessionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "v={}", self.version)?;
        writeln!(f, "o={}", self.origin)?;
        writeln!(f, "s={}", self.session_name)?;
        writeln!(f, "t={}", self.timing)?;
        if let Some(group) = &self.group {
            writeln!(f, "a=group:{}", group)?;
        }
        writeln!(f, "m={}", self.media)?;
        writeln!(f, "c={}", self.connection)?;
        for attribute in &self.attributes {
            writeln!(f, "a={}", attribute)?;
        }
        Ok(())
    }
}

fn addr_type_token(address: &IpAddr) -> &'static str {
    match address {
        IpAddr::V4(_) => "IP4",
        IpAddr::V6(_) => "IP6",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionDescription {
        let addr: IpAddr = "10.0.0.5".parse().unwrap();
        SessionDescription {
            version: SDP_VERSION,
            origin: Origin::anonymous(1234, &addr),
            session_name: "-".to_string(),
            timing: TimeDescription::unbounded(),
            group: Some("BUNDLE 0".to_string()),
            media: MediaDescription::datachannel(9001, "TCP/DTLS/SCTP"),
            connection: ConnectionData::new(&addr),
            attributes: vec![
                Attribute::value("mid", "0"),
                Attribute::flag("ice-lite"),
            ],
        }
    }

    #[test]
    fn test_serialization_order_and_terminator() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "v=0");
        assert_eq!(lines[1], "o=- 1234 0 IN IP4 10.0.0.5");
        assert_eq!(lines[2], "s=-");
        assert_eq!(lines[3], "t=0 0");
        assert_eq!(lines[4], "a=group:BUNDLE 0");
        assert_eq!(lines[5], "m=application 9001 TCP/DTLS/SCTP webrtc-datachannel");
        assert_eq!(lines[6], "c=IN IP4 10.0.0.5");
        assert_eq!(lines[7], "a=mid:0");
        assert_eq!(lines[8], "a=ice-lite");
        assert!(text.ends_with('\n'), "document must end with a line feed");
        assert!(!text.contains('\r'));
    }

    #[test]
    fn test_ipv6_origin_and_connection() {
        let addr: IpAddr = "2001:db8::1".parse().unwrap();
        let origin = Origin::anonymous(7, &addr);
        assert_eq!(origin.to_string(), "- 7 0 IN IP6 2001:db8::1");
        assert_eq!(ConnectionData::new(&addr).to_string(), "IN IP6 2001:db8::1");
    }

    #[test]
    fn test_attribute_accessors() {
        let desc = sample();
        assert_eq!(desc.mid(), Some("0"));
        assert_eq!(desc.attribute("ice-lite").map(|a| a.value.is_none()), Some(true));
        assert_eq!(desc.ice_ufrag(), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let desc = sample();
        let json = serde_json::to_string(&desc).unwrap();
        let back: SessionDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
    }

    #[test]
    fn test_flag_attribute_display() {
        assert_eq!(Attribute::flag("ice-lite").to_string(), "ice-lite");
        assert_eq!(Attribute::value("sctp-port", "5000").to_string(), "sctp-port:5000");
    }
}
