//! Data-channel attributes (RFC 8841)
//!
//! Numeric validation for the `sctp-port` and `max-message-size` attribute
//! values carried by data-channel media sections.

use nom::{character::complete::digit1, combinator::map_res, IResult};

use crate::error::{Error, Result};

fn u16_value(input: &str) -> IResult<&str, u16> {
    map_res(digit1, |s: &str| s.parse::<u16>())(input)
}

fn u64_value(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |s: &str| s.parse::<u64>())(input)
}

/// Parses an `sctp-port` attribute value.
///
/// This is the SCTP association port, not the transport-layer port from the
/// media description line.
pub fn parse_sctp_port(value: &str) -> Result<u16> {
    let value = value.trim();
    match u16_value(value) {
        Ok(("", port)) => Ok(port),
        Ok((_, _)) => Err(Error::SdpParsingError(format!(
            "trailing characters in sctp-port: {}",
            value
        ))),
        Err(_) => Err(Error::SdpParsingError(format!(
            "invalid sctp-port: {}",
            value
        ))),
    }
}

/// Parses a `max-message-size` attribute value (bytes, must be positive).
pub fn parse_max_message_size(value: &str) -> Result<u64> {
    let value = value.trim();
    match u64_value(value) {
        Ok(("", 0)) => Err(Error::SdpParsingError(
            "max-message-size must be greater than 0".to_string(),
        )),
        Ok(("", size)) => Ok(size),
        Ok((_, _)) => Err(Error::SdpParsingError(format!(
            "trailing characters in max-message-size: {}",
            value
        ))),
        Err(_) => Err(Error::SdpParsingError(format!(
            "invalid max-message-size: {}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sctp_port() {
        assert_eq!(parse_sctp_port("5000").unwrap(), 5000);
        assert_eq!(parse_sctp_port("1").unwrap(), 1);
        assert_eq!(parse_sctp_port("65535").unwrap(), 65535);
        assert_eq!(parse_sctp_port(" 5000 ").unwrap(), 5000);
    }

    #[test]
    fn test_invalid_sctp_port() {
        assert!(parse_sctp_port("port").is_err());
        assert!(parse_sctp_port("12a34").is_err());
        assert!(parse_sctp_port("").is_err());
        assert!(parse_sctp_port("-5000").is_err());
        assert!(parse_sctp_port("65536").is_err());
        assert!(parse_sctp_port("5000.5").is_err());
    }

    #[test]
    fn test_valid_max_message_size() {
        assert_eq!(parse_max_message_size("100000").unwrap(), 100000);
        assert_eq!(parse_max_message_size("1").unwrap(), 1);
        assert_eq!(
            parse_max_message_size("18446744073709551615").unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_invalid_max_message_size() {
        assert!(parse_max_message_size("0").is_err());
        assert!(parse_max_message_size("size").is_err());
        assert!(parse_max_message_size("1024b").is_err());
        assert!(parse_max_message_size("-1").is_err());
    }
}
