//! Negotiation-document parsing
//!
//! Line-oriented parsing of session descriptions (RFC 8866). Each line has
//! the form `<type>=<value>` with a single-character type. The parser is
//! forward-compatible: attributes it does not understand are preserved
//! opaquely and in order, so a parse/serialize cycle of a document this
//! stack produced is byte-identical.
//!
//! Two hard requirements from the consuming engines:
//! - the document must end with a line feed;
//! - the document must contain exactly one media description (the single
//!   data-channel use case).

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{anychar, char, digit1, not_line_ending, space1},
    sequence::tuple,
    IResult,
};
use tracing::trace;

use crate::attributes::{parse_max_message_size, parse_sctp_port, CandidateAttribute};
use crate::document::{
    Attribute, ConnectionData, MediaDescription, Origin, SessionDescription, TimeDescription,
};
use crate::error::{Error, Result};

/// Parses a single SDP line into its type character and value.
///
/// Handles both CRLF and LF line endings and trims surrounding whitespace
/// from the value.
pub fn parse_sdp_line(input: &str) -> IResult<&str, (char, &str)> {
    let (input, key) = anychar(input)?;
    let (input, _) = char('=')(input)?;
    let (input, value) = not_line_ending(input)?;
    let input = input.trim_start_matches(['\r', '\n']);
    Ok((input, (key, value.trim())))
}

fn parse_origin_nom(input: &str) -> IResult<&str, Origin> {
    // Format: <username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>
    let (remainder, (username, _, sess_id, _, sess_version, _, net_type, _, addr_type, _, addr)) =
        tuple((
            take_till(|c| c == ' '),
            space1,
            digit1,
            space1,
            digit1,
            space1,
            tag("IN"),
            space1,
            alt((tag("IP4"), tag("IP6"))),
            space1,
            take_till(|c: char| c == ' ' || c == '\r' || c == '\n'),
        ))(input)?;

    Ok((
        remainder,
        Origin {
            username: username.to_string(),
            sess_id: sess_id.to_string(),
            sess_version: sess_version.to_string(),
            net_type: net_type.to_string(),
            addr_type: addr_type.to_string(),
            unicast_address: addr.to_string(),
        },
    ))
}

/// Parses an origin line value (`o=` stripped)
pub fn parse_origin_line(value: &str) -> Result<Origin> {
    match parse_origin_nom(value.trim()) {
        Ok((remainder, origin)) if remainder.trim().is_empty() => Ok(origin),
        _ => Err(Error::SdpParsingError(format!(
            "invalid o= line: {}",
            value
        ))),
    }
}

/// Parses a connection line value (`c=` stripped)
pub fn parse_connection_line(value: &str) -> Result<ConnectionData> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::SdpParsingError(format!(
            "invalid c= line: {}",
            value
        )));
    }
    if parts[0] != "IN" {
        return Err(Error::SdpParsingError(format!(
            "unsupported network type: {}",
            parts[0]
        )));
    }
    if parts[1] != "IP4" && parts[1] != "IP6" {
        return Err(Error::SdpParsingError(format!(
            "unsupported address type: {}",
            parts[1]
        )));
    }
    Ok(ConnectionData {
        net_type: parts[0].to_string(),
        addr_type: parts[1].to_string(),
        connection_address: parts[2].to_string(),
    })
}

/// Parses a timing line value (`t=` stripped)
pub fn parse_timing_line(value: &str) -> Result<TimeDescription> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(Error::SdpParsingError(format!(
            "invalid t= line: {}",
            value
        )));
    }
    let start = parts[0]
        .parse::<u64>()
        .map_err(|_| Error::SdpParsingError(format!("invalid start time: {}", parts[0])))?;
    let stop = parts[1]
        .parse::<u64>()
        .map_err(|_| Error::SdpParsingError(format!("invalid stop time: {}", parts[1])))?;
    Ok(TimeDescription { start, stop })
}

/// Parses a media description line value (`m=` stripped)
pub fn parse_media_line(value: &str) -> Result<MediaDescription> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(Error::SdpParsingError(format!(
            "invalid m= line: {}",
            value
        )));
    }
    let port = parts[1]
        .parse::<u16>()
        .map_err(|_| Error::SdpParsingError(format!("invalid media port: {}", parts[1])))?;
    Ok(MediaDescription {
        media: parts[0].to_string(),
        port,
        proto: parts[2].to_string(),
        formats: parts[3..].iter().map(|s| s.to_string()).collect(),
    })
}

/// Splits an attribute value into key and optional value at the first colon
fn parse_attribute(value: &str) -> Attribute {
    match value.split_once(':') {
        Some((key, value)) => Attribute::value(key, value),
        None => Attribute::flag(value),
    }
}

/// Checks the few attribute values this stack depends on; everything else
/// passes through unvalidated.
fn validate_known_attribute(attribute: &Attribute) -> Result<()> {
    match (attribute.key.as_str(), attribute.value.as_deref()) {
        ("sctp-port", Some(value)) => parse_sctp_port(value).map(|_| ()),
        ("max-message-size", Some(value)) => parse_max_message_size(value).map(|_| ()),
        ("candidate", Some(value)) => CandidateAttribute::parse(value).map(|_| ()),
        _ => Ok(()),
    }
}

/// Parses a complete session description.
///
/// Extracts the typed session/media fields and keeps every remaining
/// attribute verbatim. Rejects documents without the trailing line feed and
/// documents with more or fewer than one media description.
pub fn parse_session_description(input: &str) -> Result<SessionDescription> {
    if !input.ends_with('\n') {
        return Err(Error::SdpParsingError(
            "document is missing the trailing line feed".to_string(),
        ));
    }

    let mut version = None;
    let mut origin = None;
    let mut session_name = None;
    let mut timing = None;
    let mut group = None;
    let mut media = None;
    let mut connection = None;
    let mut attributes = Vec::new();

    for line in input.lines() {
        if line.is_empty() {
            continue;
        }
        let (_, (key, value)) = parse_sdp_line(line)
            .map_err(|_| Error::SdpParsingError(format!("malformed line: {}", line)))?;

        match key {
            'v' => {
                if value != "0" {
                    return Err(Error::SdpParsingError(format!(
                        "unsupported SDP version: {}",
                        value
                    )));
                }
                version = Some(0u8);
            }
            'o' => origin = Some(parse_origin_line(value)?),
            's' => session_name = Some(value.to_string()),
            't' => timing = Some(parse_timing_line(value)?),
            'c' => connection = Some(parse_connection_line(value)?),
            'm' => {
                if media.is_some() {
                    return Err(Error::SdpParsingError(
                        "document must contain exactly one media description".to_string(),
                    ));
                }
                media = Some(parse_media_line(value)?);
            }
            'a' => {
                let attribute = parse_attribute(value);
                if attribute.key == "group" && group.is_none() {
                    group = attribute.value;
                } else {
                    validate_known_attribute(&attribute)?;
                    attributes.push(attribute);
                }
            }
            // Session information, bandwidth, encryption keys and friends are
            // irrelevant to the data-channel use case.
            other => trace!("ignoring SDP line type '{}'", other),
        }
    }

    Ok(SessionDescription {
        version: version
            .ok_or_else(|| Error::SdpParsingError("missing v= line".to_string()))?,
        origin: origin.ok_or_else(|| Error::SdpParsingError("missing o= line".to_string()))?,
        session_name: session_name
            .ok_or_else(|| Error::SdpParsingError("missing s= line".to_string()))?,
        timing: timing.ok_or_else(|| Error::SdpParsingError("missing t= line".to_string()))?,
        group,
        media: media.ok_or_else(|| Error::SdpParsingError("missing m= line".to_string()))?,
        connection: connection
            .ok_or_else(|| Error::SdpParsingError("missing c= line".to_string()))?,
        attributes,
    })
}
