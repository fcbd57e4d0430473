//! Codec for item version urns.
//!
//! The service embeds a design version id as standard base64 with every
//! `/` swapped for `_` and the `=` padding stripped, so the urn can ride
//! inside a pipe-delimited node key and a URL path. Decoding reverses the
//! substitution for all occurrences, then accepts both padded and
//! unpadded input.

use crate::error::Error;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// Standard-alphabet engine: encodes without padding, decodes either way.
const URN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode an item urn back into the raw version id.
pub fn decode_version_id(urn: &str) -> Result<String, Error> {
    let bytes = URN_ENGINE.decode(urn.replace('_', "/"))?;
    Ok(String::from_utf8(bytes)?)
}

/// Encode a raw version id into the urn form carried in node keys.
pub fn encode_version_id(version_id: &str) -> String {
    URN_ENGINE.encode(version_id).replace('/', "_")
}
