//! RFC 1035 §4.2.2 message framing for DNS over TCP.
//!
//! Every DNS message on a TCP connection is preceded by a two-byte
//! big-endian length field. The gateway speaks this framing toward the
//! upstream resolver in both directions; the HTTP leg carries the bare
//! message with no prefix.

use crate::errors::GatewayError;

/// Largest message the two-byte length field can describe.
///
/// A DNS message longer than this cannot be framed over TCP at all; the
/// limit comes from the protocol, not from this implementation.
pub const MAX_MESSAGE_SIZE: usize = 65535;

/// Encode a message length as the two-byte big-endian wire prefix.
pub fn encode_length(len: usize) -> Result<[u8; 2], GatewayError> {
    if len > MAX_MESSAGE_SIZE {
        return Err(GatewayError::MessageTooLarge(len));
    }
    Ok((len as u16).to_be_bytes())
}

/// Decode a two-byte big-endian wire prefix into a message length.
pub fn decode_length(prefix: [u8; 2]) -> u16 {
    u16::from_be_bytes(prefix)
}
