//! Route encoding for search ids.
//!
//! Search pages live at `/search/<id>` where the id is the integer's minimal
//! big-endian byte string in URL-safe base64 without padding.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::types::errors::CodecError;

/// Encodes a search id for use in a route.
pub fn encode_search_id(search_id: u64) -> String {
    let bytes = search_id.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len() - 1);
    URL_SAFE_NO_PAD.encode(&bytes[first..])
}

/// Decodes a search id from its route form.
pub fn decode_search_id(encoded: &str) -> Result<u64, CodecError> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Err(CodecError::Empty);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| CodecError::InvalidEncoding(e.to_string()))?;
    if bytes.is_empty() {
        return Err(CodecError::Empty);
    }
    if bytes.len() > 8 {
        return Err(CodecError::TooLarge(bytes.len()));
    }

    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

/// Returns the sidebar link for a search.
pub fn search_href(search_id: u64) -> String {
    format!("/search/{}", encode_search_id(search_id))
}
