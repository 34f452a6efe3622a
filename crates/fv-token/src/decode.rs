//! Unverified JWT payload decoding.
//!
//! The client never validates signatures: the identity provider only hands
//! out tokens through an authenticated session, and the backend performs its
//! own verification. Decoding here is a plain base64url payload read.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::claims::IdentityClaims;
use crate::error::{TokenError, TokenResult};

/// Decodes the claim set from a compact JWT without verifying the signature.
///
/// # Errors
///
/// Returns [`TokenError::Malformed`] if the token does not have three
/// dot-separated segments, or a decoding error if the payload segment is not
/// base64url-encoded JSON with the required claims.
pub fn decode_claims(token: &str) -> TokenResult<IdentityClaims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    // Some encoders pad the segment even though JWS segments must not be.
    let payload = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    let claims = serde_json::from_slice(&bytes)?;
    Ok(claims)
}
