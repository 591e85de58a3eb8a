// Token codec options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How strictly decoded tokens are checked.
///
/// `Permissive` reproduces the observed behavior of the deployments this
/// codec interoperates with: the sign key must be HMAC-compatible, but the
/// signature is not required to match, expiration is not enforced, and no
/// issuer/audience checks run. This is an explicit, documented policy
/// choice rather than a silent default; switch to `Strict` to require a
/// valid HS256 signature and an unexpired token.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValidationPolicy {
    #[default]
    Permissive,
    Strict,
}

/// Configuration for [`TokenCodec`](crate::TokenCodec).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenOptions {
    /// Name of the claim carrying the tenant identifier. Matched
    /// case-insensitively on decode.
    pub claim: String,
    /// Lifetime stamped into `exp` on encode. Informational only under
    /// the `Permissive` policy.
    #[serde(with = "humantime_serde")]
    pub expires_in: Duration,
    /// Decode-side validation strictness.
    pub validation: ValidationPolicy,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            claim: "tenantId".to_string(),
            expires_in: Duration::from_secs(3600), // 1 hour
            validation: ValidationPolicy::default(),
        }
    }
}

impl TokenOptions {
    /// Set the tenant claim name.
    pub fn claim<S: Into<String>>(mut self, claim: S) -> Self {
        self.claim = claim.into();
        self
    }

    /// Set the token lifetime.
    pub fn expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = expires_in;
        self
    }

    /// Set the validation policy.
    pub fn validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), String> {
        if self.claim.is_empty() {
            return Err("token claim name cannot be empty".to_string());
        }
        if self.expires_in.as_secs() == 0 {
            return Err("token expiration must be greater than 0".to_string());
        }
        Ok(())
    }
}
