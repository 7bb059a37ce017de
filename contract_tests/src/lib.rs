//! # Wire Contract Tests
//!
//! This crate provides "golden" tests for the guest/host wire contract to
//! ensure it doesn't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Frames are written out as literal JSON
//! - **Testability first**: Contract tests fail when a tag or field is renamed
//! - **Both directions**: Every message is checked encoding and decoding
//!
//! ## Structure
//!
//! Each direction has a module with contract tests that verify:
//! - Command tags
//! - Payload field names
//! - Enum spellings
//! - Export request shape per format

pub mod export_request;
pub mod guest_messages;
pub mod host_messages;

/// Common test helpers for contract validation
pub mod test_helpers {
    use ipc::{decode_guest, decode_host, encode_guest, encode_host, GuestMessage, HostMessage};
    use serde_json::Value;

    fn parse(frame: &str) -> Value {
        serde_json::from_str(frame).expect("golden frame is valid JSON")
    }

    /// Verifies a guest message encodes to `golden` and decodes back from it
    pub fn verify_guest_contract(message: &GuestMessage, golden: &str) {
        let encoded = encode_guest(message).expect("Failed to encode guest message");
        assert_eq!(
            parse(&encoded),
            parse(golden),
            "Guest frame changed for `{}`",
            message.command()
        );
        let decoded = decode_guest(golden).expect("Failed to decode golden guest frame");
        assert_eq!(&decoded, message);
    }

    /// Verifies a host message encodes to `golden` and decodes back from it
    pub fn verify_host_contract(message: &HostMessage, golden: &str) {
        let encoded = encode_host(message).expect("Failed to encode host message");
        assert_eq!(
            parse(&encoded),
            parse(golden),
            "Host frame changed for `{}`",
            message.command()
        );
        let decoded = decode_host(golden)
            .expect("Failed to decode golden host frame")
            .expect("Golden host frame uses an unknown command");
        assert_eq!(&decoded, message);
    }

    /// Verifies the `command` tag of an encoded frame
    pub fn verify_command_tag(frame: &str, expected: &str) {
        let value = parse(frame);
        assert_eq!(
            value.get("command").and_then(Value::as_str),
            Some(expected),
            "Command tag changed: expected '{}', got {}",
            expected,
            value
        );
    }
}
