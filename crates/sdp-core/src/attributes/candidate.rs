//! ICE candidate attribute (RFC 8839)
//!
//! Format: `a=candidate:<foundation> <component-id> <transport> <priority>
//! <conn-addr> <port> typ <cand-type> [raddr <raddr>] [rport <rport>]
//! *(extensions)`
//!
//! The fabricated answer only ever emits a single host candidate, but the
//! parser accepts the full grammar so externally produced documents survive
//! a parse/serialize cycle.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parsed `a=candidate` attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAttribute {
    /// Candidate foundation
    pub foundation: String,
    /// Component id (1-256); 1 for the data component
    pub component_id: u32,
    /// Transport token, `UDP` or `TCP`
    pub transport: String,
    /// Candidate priority
    pub priority: u32,
    /// Connection address (IP literal)
    pub connection_address: String,
    /// Transport-layer port
    pub port: u16,
    /// Candidate type: `host`, `srflx`, `prflx` or `relay`
    pub candidate_type: String,
    /// Related address for reflexive/relay candidates
    pub related_address: Option<String>,
    /// Related port for reflexive/relay candidates
    pub related_port: Option<u16>,
    /// Extension key/value pairs, in order
    pub extensions: Vec<(String, Option<String>)>,
}

impl CandidateAttribute {
    /// A host candidate for the given endpoint, as declared in a fabricated
    /// answer: foundation 0, component 1, no related address.
    pub fn host(address: &IpAddr, port: u16, transport_token: &str, priority: u32) -> Self {
        Self {
            foundation: "0".to_string(),
            component_id: 1,
            transport: transport_token.to_string(),
            priority,
            connection_address: address.to_string(),
            port,
            candidate_type: "host".to_string(),
            related_address: None,
            related_port: None,
            extensions: Vec::new(),
        }
    }

    /// Parses a candidate attribute value
    pub fn parse(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split_whitespace().collect();

        if parts.len() < 8 {
            return Err(Error::SdpParsingError(format!(
                "invalid candidate, insufficient parts: {}",
                value
            )));
        }

        let foundation = parts[0].to_string();

        let component_id = match parts[1].parse::<u32>() {
            Ok(id) if (1..=256).contains(&id) => id,
            _ => {
                return Err(Error::SdpParsingError(format!(
                    "invalid component id in candidate: {}",
                    parts[1]
                )))
            }
        };

        let transport = parts[2].to_string();
        if !transport.eq_ignore_ascii_case("UDP") && !transport.eq_ignore_ascii_case("TCP") {
            return Err(Error::SdpParsingError(format!(
                "invalid transport in candidate: {}",
                transport
            )));
        }

        let priority = parts[3].parse::<u32>().map_err(|_| {
            Error::SdpParsingError(format!("invalid priority in candidate: {}", parts[3]))
        })?;

        let connection_address = parts[4].to_string();
        if !is_valid_address(&connection_address) {
            return Err(Error::SdpParsingError(format!(
                "invalid connection address in candidate: {}",
                connection_address
            )));
        }

        let port = parts[5].parse::<u16>().map_err(|_| {
            Error::SdpParsingError(format!("invalid port in candidate: {}", parts[5]))
        })?;

        if parts[6] != "typ" {
            return Err(Error::SdpParsingError(format!(
                "expected 'typ' keyword in candidate, found: {}",
                parts[6]
            )));
        }

        let candidate_type = parts[7].to_string();
        if !["host", "srflx", "prflx", "relay"].contains(&candidate_type.as_str()) {
            return Err(Error::SdpParsingError(format!(
                "invalid candidate type: {}",
                candidate_type
            )));
        }

        let mut related_address = None;
        let mut related_port = None;
        let mut extensions = Vec::new();

        let mut idx = 8;
        while idx < parts.len() {
            match parts[idx] {
                "raddr" => {
                    idx += 1;
                    let addr = parts.get(idx).ok_or_else(|| {
                        Error::SdpParsingError("raddr keyword without address".to_string())
                    })?;
                    if !is_valid_address(addr) {
                        return Err(Error::SdpParsingError(format!(
                            "invalid related address in candidate: {}",
                            addr
                        )));
                    }
                    related_address = Some(addr.to_string());
                }
                "rport" => {
                    idx += 1;
                    let port = parts.get(idx).ok_or_else(|| {
                        Error::SdpParsingError("rport keyword without port".to_string())
                    })?;
                    related_port = Some(port.parse::<u16>().map_err(|_| {
                        Error::SdpParsingError(format!(
                            "invalid related port in candidate: {}",
                            port
                        ))
                    })?);
                }
                key => {
                    let mut value = None;
                    if let Some(next) = parts.get(idx + 1) {
                        if !["raddr", "rport", "typ"].contains(next) {
                            value = Some(next.to_string());
                            idx += 1;
                        }
                    }
                    extensions.push((key.to_string(), value));
                }
            }
            idx += 1;
        }

        if related_address.is_some() && related_port.is_none() {
            return Err(Error::SdpParsingError(
                "candidate has raddr but no rport".to_string(),
            ));
        }

        Ok(Self {
            foundation,
            component_id,
            transport,
            priority,
            connection_address,
            port,
            candidate_type,
            related_address,
            related_port,
            extensions,
        })
    }
}

impl fmt::Display for CandidateAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} typ {}",
            self.foundation,
            self.component_id,
            self.transport,
            self.priority,
            self.connection_address,
            self.port,
            self.candidate_type
        )?;
        if let (Some(addr), Some(port)) = (&self.related_address, self.related_port) {
            write!(f, " raddr {} rport {}", addr, port)?;
        }
        for (key, value) in &self.extensions {
            match value {
                Some(value) => write!(f, " {} {}", key, value)?,
                None => write!(f, " {}", key)?,
            }
        }
        Ok(())
    }
}

/// Connection addresses may be IP literals or FQDNs (RFC 8839).
fn is_valid_address(addr: &str) -> bool {
    if addr.parse::<IpAddr>().is_ok() {
        return true;
    }
    // Hostname: dot-separated labels of letters, digits and hyphens
    !addr.is_empty()
        && !addr.starts_with('.')
        && !addr.ends_with('.')
        && !addr.contains("..")
        && addr
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}
