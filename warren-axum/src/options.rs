//! Pipeline stage configuration.

use warren_core::TenancyError;
use warren_token::TokenOptions;

/// Header carrying the signed tenant token (Token mode). Exact name is a
/// wire contract with existing callers.
pub const TOKEN_TENANT_HEADER: &str = "X-Tenant-ID";

/// Header carrying the plain tenant id (Header mode).
pub const PLAIN_TENANT_HEADER: &str = "Tenant-Id";

/// How requests name their tenant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    /// `X-Tenant-ID` carries a signed token; the decoded id is combined
    /// with the named data source for a composite catalog lookup.
    Token { data_source: String },
    /// `Tenant-Id` carries the id itself; direct catalog lookup.
    Header,
}

impl AddressingMode {
    /// Shorthand for the token variant.
    pub fn token<S: Into<String>>(data_source: S) -> Self {
        Self::Token {
            data_source: data_source.into(),
        }
    }

    /// The request header this mode reads the tenant from.
    pub fn tenant_header(&self) -> &'static str {
        match self {
            AddressingMode::Token { .. } => TOKEN_TENANT_HEADER,
            AddressingMode::Header => PLAIN_TENANT_HEADER,
        }
    }
}

/// Configuration for the tenant resolution stage.
///
/// Bypass rules keep documentation and introspection endpoints reachable
/// without tenant credentials: exact paths (the OpenAPI document) and path
/// fragments (GraphQL, which has no single documentation path).
#[derive(Clone, Debug)]
pub struct TenancyOptions {
    pub mode: AddressingMode,
    /// Codec options; only consulted in Token mode.
    pub token: TokenOptions,
    /// Paths exempted by exact match.
    pub bypass_paths: Vec<String>,
    /// Substrings exempting any path containing them.
    pub bypass_fragments: Vec<String>,
}

impl Default for TenancyOptions {
    fn default() -> Self {
        Self {
            mode: AddressingMode::Header,
            token: TokenOptions::default(),
            bypass_paths: vec!["/api/openapi".to_string()],
            bypass_fragments: vec!["/graphql".to_string()],
        }
    }
}

impl TenancyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the addressing mode.
    pub fn mode(mut self, mode: AddressingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the token codec options.
    pub fn token(mut self, token: TokenOptions) -> Self {
        self.token = token;
        self
    }

    /// Add an exact-match bypass path.
    pub fn bypass_path<S: Into<String>>(mut self, path: S) -> Self {
        self.bypass_paths.push(path.into());
        self
    }

    /// Add a substring bypass rule.
    pub fn bypass_fragment<S: Into<String>>(mut self, fragment: S) -> Self {
        self.bypass_fragments.push(fragment.into());
        self
    }

    /// Whether the path is exempt from tenant resolution.
    pub fn is_bypass(&self, path: &str) -> bool {
        self.bypass_paths.iter().any(|p| p == path)
            || self.bypass_fragments.iter().any(|f| path.contains(f))
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), TenancyError> {
        if let AddressingMode::Token { data_source } = &self.mode {
            self.token
                .validate()
                .map_err(TenancyError::Configuration)?;
            if data_source.is_empty() {
                return Err(TenancyError::Configuration(
                    "token addressing requires a data source name".to_string(),
                ));
            }
        }
        Ok(())
    }
}
