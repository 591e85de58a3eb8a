//! Multi-tenancy runtime settings.
//!
//! Warren is configuration-loader agnostic: applications load these values
//! however they like (file, env, secret store) and hand them in once at
//! startup. Everything here is immutable after load; no component re-reads
//! or mutates settings per request.

use crate::errors::TenancyError;

/// The multi-tenancy section of the runtime configuration.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiTenancy {
    /// Whether tenant resolution runs at all. When `false` the pipeline
    /// stage forwards every request untouched.
    pub enabled: bool,
    /// Shared secret for the tenant token's message authentication code.
    /// Required whenever `enabled` is true.
    pub tenant_sign_key: Option<String>,
}

impl MultiTenancy {
    /// Settings with tenancy switched off.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Settings with tenancy on and the given sign key.
    pub fn enabled<S: Into<String>>(tenant_sign_key: S) -> Self {
        Self {
            enabled: true,
            tenant_sign_key: Some(tenant_sign_key.into()),
        }
    }

    /// Check the settings are internally consistent.
    ///
    /// An absent or empty sign key while tenancy is enabled is a fatal
    /// startup error, never a per-request one.
    pub fn validate(&self) -> Result<(), TenancyError> {
        if self.enabled {
            self.sign_key()?;
        }
        Ok(())
    }

    /// The sign key, or a configuration error when it is missing or empty.
    pub fn sign_key(&self) -> Result<&str, TenancyError> {
        match self.tenant_sign_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(TenancyError::Configuration(
                "tenant sign key is missing while multi-tenancy is enabled".to_string(),
            )),
        }
    }
}

/// A data-source target in the direct (tenant → data source) catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataSource {
    pub connection_string: String,
}

impl DataSource {
    pub fn new<S: Into<String>>(connection_string: S) -> Self {
        Self {
            connection_string: connection_string.into(),
        }
    }
}
