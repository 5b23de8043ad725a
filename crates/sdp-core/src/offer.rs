//! Offer adjustment
//!
//! Rewrites a host-generated offer before it is committed as the local
//! description, so that its negotiation credentials are predictable:
//!
//! - the first `a=ice-ufrag` line is replaced with the configured ufrag;
//! - the first `a=ice-pwd` line is replaced with the configured password;
//! - the first `a=ice-options` line is forced to `ice2`, since no trickled
//!   candidates will ever follow the initial exchange (RFC 8839).
//!
//! Every other line passes through byte-for-byte, including its CR/LF line
//! terminator. A missing target line degrades to a no-op on that field; the
//! caller decides whether that is worth a warning, so no logging happens
//! here.

use crate::credentials::IceCredentials;

/// ICE option forced into adjusted offers: RFC 8839 semantics without
/// trickling.
pub const ICE_OPTIONS_NO_TRICKLE: &str = "ice2";

/// Which of the three targeted attribute lines were actually rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdjustmentOutcome {
    /// `a=ice-ufrag` was found and replaced
    pub ufrag_replaced: bool,
    /// `a=ice-pwd` was found and replaced
    pub pwd_replaced: bool,
    /// `a=ice-options` was found and replaced
    pub options_replaced: bool,
}

impl AdjustmentOutcome {
    /// True when all three targeted lines were present and rewritten
    pub fn is_complete(&self) -> bool {
        self.ufrag_replaced && self.pwd_replaced && self.options_replaced
    }
}

/// Adjusts an offer document in textual form.
///
/// Returns the adjusted text together with the per-field outcome. The
/// adjusted offer keeps the media/transport shape of the original and
/// differs only in the substituted attribute values.
pub fn adjust_offer(offer: &str, credentials: &IceCredentials) -> (String, AdjustmentOutcome) {
    let mut adjusted = String::with_capacity(offer.len() + 64);
    let mut outcome = AdjustmentOutcome::default();

    for chunk in split_inclusive_lines(offer) {
        let (line, terminator) = chunk;
        if !outcome.ufrag_replaced && line.starts_with("a=ice-ufrag:") {
            adjusted.push_str("a=ice-ufrag:");
            adjusted.push_str(&credentials.ufrag);
            outcome.ufrag_replaced = true;
        } else if !outcome.pwd_replaced && line.starts_with("a=ice-pwd:") {
            adjusted.push_str("a=ice-pwd:");
            adjusted.push_str(&credentials.pwd);
            outcome.pwd_replaced = true;
        } else if !outcome.options_replaced && line.starts_with("a=ice-options:") {
            adjusted.push_str("a=ice-options:");
            adjusted.push_str(ICE_OPTIONS_NO_TRICKLE);
            outcome.options_replaced = true;
        } else {
            adjusted.push_str(line);
        }
        adjusted.push_str(terminator);
    }

    (adjusted, outcome)
}

/// Splits into (line content, line terminator) pairs, keeping the original
/// CRLF/LF terminators so untouched lines survive verbatim.
fn split_inclusive_lines(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.split_inclusive('\n').map(|chunk| {
        if let Some(line) = chunk.strip_suffix("\r\n") {
            (line, "\r\n")
        } else if let Some(line) = chunk.strip_suffix('\n') {
            (line, "\n")
        } else {
            (chunk, "")
        }
    })
}
