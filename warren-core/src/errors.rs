//! Tenancy error taxonomy.
//!
//! One closed set of failures for the whole resolution path. Lower layers
//! return these through plain `Result`s; the pipeline stage is the single
//! boundary that renders them into HTTP responses. Messages are written to
//! be client-safe: no key material, no internal state.

use thiserror::Error;

/// Everything that can go wrong while resolving a tenant.
///
/// `Configuration` is fatal at startup and never recoverable per request;
/// the rest are per-request, terminal for that request, and client-caused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TenancyError {
    /// The runtime configuration cannot support tenant resolution
    /// (e.g. tenancy enabled without a sign key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The tenant-carrying header is absent or empty.
    #[error("{0} header is missing.")]
    MissingHeader(String),

    /// The header value could not be parsed as a tenant token.
    #[error("malformed tenant token: {0}")]
    MalformedToken(String),

    /// The token parsed but carries no tenant-identifier claim.
    #[error("token does not carry a '{0}' claim")]
    ClaimMissing(String),

    /// The tenant id resolved to no registry entry.
    #[error("Tenant ID '{0}' not found in the configuration.")]
    UnknownTenant(String),
}

impl TenancyError {
    /// HTTP status for this failure: 400 for everything the client caused,
    /// 500 for configuration problems observed at request time.
    pub fn status_code(&self) -> u16 {
        match self {
            TenancyError::Configuration(_) => 500,
            TenancyError::MissingHeader(_)
            | TenancyError::MalformedToken(_)
            | TenancyError::ClaimMissing(_)
            | TenancyError::UnknownTenant(_) => 400,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
