//! Wire-format tests for synthesized answers
//!
//! Checks the exact byte-level lines other deployments depend on, plus the
//! serialization laws (trailing line feed, parse/serialize round trip).

use bytes::Bytes;
use rand::rngs::OsRng;
use rtcdial_sdp_core::prelude::*;

fn stream_target() -> ConnectionTarget {
    ConnectionTarget::new(
        "10.0.0.5".parse().unwrap(),
        9001,
        TransportProtocol::Stream,
        Bytes::from_static(&[0xabu8; 32]),
    )
}

#[test]
fn stream_answer_matches_deployed_wire_format() {
    let creds = IceCredentials::generate(&mut OsRng).unwrap();
    let answer = synthesize_answer(
        &stream_target(),
        TransportProtocol::Stream,
        "0",
        &creds,
        &AnswerConfig::default(),
    );
    let text = answer.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "v=0");
    assert_eq!(lines[2], "s=-");
    assert_eq!(lines[3], "t=0 0");
    assert_eq!(lines[4], "a=group:BUNDLE 0");
    assert_eq!(
        lines[5],
        "m=application 9001 TCP/DTLS/SCTP webrtc-datachannel"
    );
    assert_eq!(lines[6], "c=IN IP4 10.0.0.5");
    assert!(lines.contains(&"a=sctp-port:5000"));
    assert!(lines.contains(&"a=max-message-size:100000"));
    assert!(lines.contains(&"a=setup:passive"));
    assert!(lines.contains(&"a=ice-options:ice2"));
    assert!(lines.contains(&"a=ice-lite"));
    assert_eq!(
        lines.last().unwrap(),
        &"a=candidate:0 1 TCP 2113667327 10.0.0.5 9001 typ host"
    );
    assert!(text.ends_with('\n'));
}

#[test]
fn candidate_protocol_token_always_matches_media_line() {
    for (protocol, media_token, cand_token) in [
        (TransportProtocol::Stream, "TCP/DTLS/SCTP", " TCP "),
        (TransportProtocol::Datagram, "UDP/DTLS/SCTP", " UDP "),
    ] {
        let creds = IceCredentials::generate(&mut OsRng).unwrap();
        let answer = synthesize_answer(
            &stream_target(),
            protocol,
            "0",
            &creds,
            &AnswerConfig::default(),
        );
        assert_eq!(answer.media.proto, media_token);
        assert!(answer
            .attribute_value("candidate")
            .unwrap()
            .contains(cand_token));
    }
}

#[test]
fn serialized_answers_round_trip_byte_identically() {
    let creds = IceCredentials::generate(&mut OsRng).unwrap();
    let answer = synthesize_answer(
        &stream_target(),
        TransportProtocol::Stream,
        "0",
        &creds,
        &AnswerConfig::default(),
    );
    let text = answer.to_string();
    let reparsed = parse_session_description(&text).unwrap();
    assert_eq!(reparsed.to_string(), text);
}

#[test]
fn identical_targets_never_share_credentials() {
    let first = IceCredentials::generate(&mut OsRng).unwrap();
    let second = IceCredentials::generate(&mut OsRng).unwrap();
    let answer_a = synthesize_answer(
        &stream_target(),
        TransportProtocol::Stream,
        "0",
        &first,
        &AnswerConfig::default(),
    );
    let answer_b = synthesize_answer(
        &stream_target(),
        TransportProtocol::Stream,
        "0",
        &second,
        &AnswerConfig::default(),
    );
    assert_ne!(answer_a.ice_ufrag(), answer_b.ice_ufrag());
    assert_ne!(answer_a.ice_pwd(), answer_b.ice_pwd());
}

#[test]
fn overridden_answer_config_is_honored() {
    let creds = IceCredentials::generate(&mut OsRng).unwrap();
    let config = AnswerConfig {
        fingerprint: "sha-256 00:11:22:33".to_string(),
        sctp_port: 5001,
        max_message_size: 65536,
        candidate_priority: 1,
    };
    let answer = synthesize_answer(
        &stream_target(),
        TransportProtocol::Stream,
        "0",
        &creds,
        &config,
    );
    let text = answer.to_string();
    assert!(text.contains("a=fingerprint:sha-256 00:11:22:33\n"));
    assert!(text.contains("a=sctp-port:5001\n"));
    assert!(text.contains("a=max-message-size:65536\n"));
    assert!(text.contains("a=candidate:0 1 TCP 1 10.0.0.5 9001 typ host\n"));
}
