//! Decoding of the GET `dns` query parameter.
//!
//! RFC 8484 §4.1 carries the DNS message base64url-encoded (RFC 4648 §5)
//! and unpadded. Padded input is tolerated; both `-` and `_` are part of
//! the alphabet itself, so every occurrence decodes, not just the first.

use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{alphabet, Engine};
use dohgate_domain::{GatewayError, MAX_MESSAGE_SIZE};

const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the `dns` parameter into a raw DNS message.
pub fn decode_dns_param(token: &str) -> Result<Vec<u8>, GatewayError> {
    let message = BASE64URL
        .decode(token)
        .map_err(|e| GatewayError::InvalidQueryEncoding(e.to_string()))?;

    if message.len() > MAX_MESSAGE_SIZE {
        return Err(GatewayError::MessageTooLarge(message.len()));
    }

    Ok(message)
}
