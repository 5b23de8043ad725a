//! ICE credential generation
//!
//! Implements the random ufrag/pwd generation used by both the adjusted
//! offer and the fabricated answer. RFC 8845 requires at least 24 bits of
//! entropy for the username fragment and 128 bits for the password.
//!
//! The full attribute grammar allows letters, digits, `+` and `/` (base64
//! without padding), but the trailing `=` of base64 is annoying to handle,
//! so values are encoded as lowercase hexadecimal instead. Hex is a strict
//! subset of the allowed alphabet; this simplification is deliberate and
//! must be preserved for interoperability with existing deployments.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum entropy for the ICE username fragment (RFC 8845)
pub const UFRAG_ENTROPY_BITS: u32 = 24;

/// Minimum entropy for the ICE password (RFC 8845)
pub const PWD_ENTROPY_BITS: u32 = 128;

/// Generates a random credential payload with the given entropy.
///
/// Draws `ceil(entropy_bits / 8)` bytes from the supplied cryptographically
/// secure source and encodes each byte as two lowercase hex characters.
///
/// Fails only when the random source itself fails; that is fatal because a
/// credential must never come from a non-cryptographic source.
pub fn generate_payload<R>(rng: &mut R, entropy_bits: u32) -> Result<String>
where
    R: RngCore + CryptoRng,
{
    if entropy_bits == 0 {
        return Err(Error::InvalidEntropy(entropy_bits));
    }

    let len = entropy_bits.div_ceil(8) as usize;
    let mut data = vec![0u8; len];
    rng.try_fill_bytes(&mut data)
        .map_err(|e| Error::CredentialSourceUnavailable(e.to_string()))?;

    Ok(data.iter().map(|b| format!("{:02x}", b)).collect())
}

/// An ICE ufrag/pwd pair.
///
/// Used only for connectivity checks, never for confidentiality. Generated
/// fresh per session and never reused across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceCredentials {
    /// Username fragment (`a=ice-ufrag`)
    pub ufrag: String,

    /// Password (`a=ice-pwd`)
    pub pwd: String,
}

impl IceCredentials {
    /// Create a credential pair from known values
    pub fn new(ufrag: impl Into<String>, pwd: impl Into<String>) -> Self {
        Self {
            ufrag: ufrag.into(),
            pwd: pwd.into(),
        }
    }

    /// Generate a fresh pair at the RFC 8845 entropy floors
    pub fn generate<R>(rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng,
    {
        Ok(Self {
            ufrag: generate_payload(rng, UFRAG_ENTROPY_BITS)?,
            pwd: generate_payload(rng, PWD_ENTROPY_BITS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_payload_lengths() {
        // ceil(24/8) = 3 bytes -> 6 hex characters
        assert_eq!(generate_payload(&mut OsRng, 24).unwrap().len(), 6);
        // ceil(128/8) = 16 bytes -> 32 hex characters
        assert_eq!(generate_payload(&mut OsRng, 128).unwrap().len(), 32);
        // Non-multiple of 8 rounds up
        assert_eq!(generate_payload(&mut OsRng, 1).unwrap().len(), 2);
        assert_eq!(generate_payload(&mut OsRng, 9).unwrap().len(), 4);
    }

    #[test]
    fn test_payload_alphabet() {
        let payload = generate_payload(&mut OsRng, 128).unwrap();
        assert!(payload.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_zero_entropy_rejected() {
        assert!(matches!(
            generate_payload(&mut OsRng, 0),
            Err(Error::InvalidEntropy(0))
        ));
    }

    #[test]
    fn test_generated_pairs_differ() {
        let a = IceCredentials::generate(&mut OsRng).unwrap();
        let b = IceCredentials::generate(&mut OsRng).unwrap();
        assert_ne!(a, b, "fresh credential pairs must not repeat");
        assert_eq!(a.ufrag.len(), 6);
        assert_eq!(a.pwd.len(), 32);
    }

    proptest! {
        #[test]
        fn prop_payload_matches_grammar(bits in 1u32..=512) {
            let payload = generate_payload(&mut OsRng, bits).unwrap();
            // Exactly two hex characters per byte of entropy
            prop_assert_eq!(payload.len() as u32, bits.div_ceil(8) * 2);
            prop_assert!(payload.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }
}
