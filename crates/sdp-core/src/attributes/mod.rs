//! Parsers and formatters for individual SDP attributes
//!
//! Only the attributes this stack produces or inspects get typed handling;
//! everything else is carried opaquely by the document model.

pub mod candidate;
pub mod datachannel;

pub use candidate::CandidateAttribute;
pub use datachannel::{parse_max_message_size, parse_sctp_port};
