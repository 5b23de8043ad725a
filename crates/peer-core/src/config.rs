//! Session configuration

use rtcdial_sdp_core::{AnswerConfig, IceCredentials};
use serde::{Deserialize, Serialize};

/// Default offer-side ufrag. The adjusted offer always carries this pair so
/// the remote endpoint can predict the connectivity-check credentials
/// without a signaling exchange.
pub const DEFAULT_OFFER_UFRAG: &str = "V6j+";

/// Default offer-side password, same role as [`DEFAULT_OFFER_UFRAG`]
pub const DEFAULT_OFFER_PWD: &str = "OEKutPgoHVk/99FfqPOf444w";

/// Default label for the single data channel
pub const DEFAULT_CHANNEL_LABEL: &str = "data";

/// Configuration for one negotiation session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Label of the data channel requested from the engine
    pub channel_label: String,

    /// Whether the data channel guarantees ordering
    pub channel_ordered: bool,

    /// Pre-negotiated channel id, if the deployment uses one
    pub negotiation_id: Option<u16>,

    /// Predictable credential pair written into the adjusted offer
    pub offer_credentials: IceCredentials,

    /// Fixed constants for the fabricated answer (fingerprint, SCTP port,
    /// maximum message size, candidate priority)
    pub answer: AnswerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            channel_label: DEFAULT_CHANNEL_LABEL.to_string(),
            channel_ordered: true,
            negotiation_id: None,
            offer_credentials: IceCredentials::new(DEFAULT_OFFER_UFRAG, DEFAULT_OFFER_PWD),
            answer: AnswerConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Start building a config from the defaults
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }
}

/// Builder for [`SessionConfig`]
#[derive(Debug, Clone, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Create a builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data-channel label
    pub fn channel_label(mut self, label: impl Into<String>) -> Self {
        self.config.channel_label = label.into();
        self
    }

    /// Set whether the data channel guarantees ordering
    pub fn channel_ordered(mut self, ordered: bool) -> Self {
        self.config.channel_ordered = ordered;
        self
    }

    /// Set a pre-negotiated channel id
    pub fn negotiation_id(mut self, id: u16) -> Self {
        self.config.negotiation_id = Some(id);
        self
    }

    /// Set the predictable offer-side credential pair
    pub fn offer_credentials(mut self, credentials: IceCredentials) -> Self {
        self.config.offer_credentials = credentials;
        self
    }

    /// Set the fabricated-answer constants
    pub fn answer(mut self, answer: AnswerConfig) -> Self {
        self.config.answer = answer;
        self
    }

    /// Finish building
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.channel_label, "data");
        assert!(config.channel_ordered);
        assert_eq!(config.negotiation_id, None);
        assert_eq!(config.offer_credentials.ufrag, DEFAULT_OFFER_UFRAG);
        assert_eq!(config.offer_credentials.pwd, DEFAULT_OFFER_PWD);
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::builder()
            .channel_label("control")
            .channel_ordered(false)
            .negotiation_id(7)
            .offer_credentials(IceCredentials::new("abcd", "0123456789abcdef0123456789abcdef"))
            .build();
        assert_eq!(config.channel_label, "control");
        assert!(!config.channel_ordered);
        assert_eq!(config.negotiation_id, Some(7));
        assert_eq!(config.offer_credentials.ufrag, "abcd");
    }
}
