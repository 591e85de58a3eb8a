// Tenant token codec.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use thiserror::Error;
use warren_core::TenancyError;

use crate::options::{TokenOptions, ValidationPolicy};

/// Failures produced by [`TokenCodec::decode`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The value is not parseable as the expected token shape, or the
    /// signature was rejected under the `Strict` policy.
    #[error("malformed tenant token: {0}")]
    Malformed(String),

    /// The token parsed but no tenant-identifier claim is present.
    #[error("token does not carry a '{0}' claim")]
    ClaimMissing(String),
}

impl From<TokenError> for TenancyError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed(msg) => TenancyError::MalformedToken(msg),
            TokenError::ClaimMissing(claim) => TenancyError::ClaimMissing(claim),
        }
    }
}

/// Encodes and decodes the compact signed tenant token.
///
/// The payload carries the tenant claim plus `iat`/`exp`. Decode-side
/// strictness is governed by [`ValidationPolicy`]; see
/// [`TokenOptions`](crate::TokenOptions).
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    options: TokenOptions,
}

// Manual impl: the keys hold secret material and must never end up in
// logs or error output.
impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(sign_key: &str, options: TokenOptions) -> Self {
        Self {
            encoding: EncodingKey::from_secret(sign_key.as_bytes()),
            decoding: DecodingKey::from_secret(sign_key.as_bytes()),
            options,
        }
    }

    pub fn options(&self) -> &TokenOptions {
        &self.options
    }

    /// Produce a signed token whose sole payload claim (besides the
    /// timestamps) is the tenant identifier.
    pub fn encode(&self, tenant_id: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let exp = now + self.options.expires_in.as_secs() as i64;

        let mut claims = Map::new();
        claims.insert(
            self.options.claim.clone(),
            Value::String(tenant_id.to_string()),
        );
        claims.insert("iat".to_string(), Value::Number(now.into()));
        claims.insert("exp".to_string(), Value::Number(exp.into()));

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Malformed(e.to_string()))
    }

    /// Parse a token and extract the tenant identifier.
    ///
    /// The tenant claim is matched by name case-insensitively; the first
    /// match wins.
    pub fn decode(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        if self.options.validation == ValidationPolicy::Permissive {
            validation.insecure_disable_signature_validation();
            validation.validate_exp = false;
            validation.required_spec_claims.clear();
        }

        let data = decode::<Map<String, Value>>(token, &self.decoding, &validation)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;

        data.claims
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&self.options.claim))
            .and_then(|(_, value)| value.as_str())
            .map(str::to_string)
            .ok_or_else(|| TokenError::ClaimMissing(self.options.claim.clone()))
    }
}
