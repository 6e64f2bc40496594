//! Request signing for the Backpack API
//!
//! The exchange authenticates requests with a detached ED25519 signature over
//! a canonical payload: the instruction name, the request parameters sorted
//! lexicographically by key, and the timestamp/window pair. Because the
//! parameter section is order-sensitive, callers hand parameters over as a
//! `BTreeMap` so the sorted order is a property of the type.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey, SECRET_KEY_LENGTH};
use url::form_urlencoded;

use crate::backpack::instructions::Instruction;
use crate::common::errors::{ClientError, Result};
use crate::config::types::ApiCredentials;

/// Signs API requests with the account's ED25519 key
///
/// The key material is decoded once at construction; signing itself is pure
/// and deterministic for fixed inputs.
#[derive(Clone)]
pub struct RequestSigner {
    api_key: String,
    signing_key: SigningKey,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl RequestSigner {
    /// Build a signer from credentials
    ///
    /// `api_secret` must be the base64 encoding of a 32-byte ED25519 seed.
    pub fn new(credentials: &ApiCredentials) -> Result<Self> {
        let seed = BASE64.decode(&credentials.api_secret).map_err(|e| {
            ClientError::Authentication(format!("Failed to decode api secret: {}", e))
        })?;

        let seed: [u8; SECRET_KEY_LENGTH] = seed.try_into().map_err(|_| {
            ClientError::Authentication(format!(
                "Api secret must decode to exactly {} bytes",
                SECRET_KEY_LENGTH
            ))
        })?;

        Ok(Self {
            api_key: credentials.api_key.clone(),
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// The API key sent alongside every signature
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The public half of the signing key, for verification
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign a request, returning the base64-encoded detached signature
    pub fn sign(
        &self,
        instruction: Instruction,
        timestamp: i64,
        window: u32,
        params: &BTreeMap<String, String>,
    ) -> String {
        let payload = signing_payload(instruction, timestamp, window, params);
        let signature = self.signing_key.sign(payload.as_bytes());
        BASE64.encode(signature.to_bytes())
    }
}

/// Build the canonical payload string the signature covers
///
/// Shape: `instruction=<name>&<key=value pairs sorted by key>&timestamp=<ts>&window=<w>`.
/// The parameter section is omitted entirely for parameterless instructions.
pub fn signing_payload(
    instruction: Instruction,
    timestamp: i64,
    window: u32,
    params: &BTreeMap<String, String>,
) -> String {
    let mut payload = format!("instruction={}", instruction.as_str());

    let mut encoder = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        encoder.append_pair(key, value);
    }
    let encoded = encoder.finish();
    if !encoded.is_empty() {
        payload.push('&');
        payload.push_str(&encoded);
    }

    payload.push_str(&format!("&timestamp={}&window={}", timestamp, window));
    payload
}

/// Encode parameters as a sorted query string, without timestamp/window
///
/// Used for the request URL so the query section matches what was signed.
pub fn encode_params(params: &BTreeMap<String, String>) -> String {
    let mut encoder = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        encoder.append_pair(key, value);
    }
    encoder.finish()
}
