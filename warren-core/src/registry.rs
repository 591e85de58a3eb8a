//! Tenant connection registry.
//!
//! Two addressing schemes over catalogs fixed at startup:
//!
//! - composite: `"<dataSource>--<tenantId>"` → connection string, used when
//!   a request is scoped to one of several named logical data sources;
//! - direct: `tenantId` → [`DataSource`], used when tenants map straight to
//!   a data source of their own.
//!
//! Lookups are exact-match single reads; both catalogs are read-only from
//! the perspective of request handling, so no locking is needed.

use std::collections::HashMap;

use crate::config::DataSource;
use crate::errors::TenancyError;

/// Separator between the data-source name and the tenant id in a
/// composite catalog key.
const COMPOSITE_SEPARATOR: &str = "--";

/// Maps tenants to their connection targets.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    composite: HashMap<String, String>,
    direct: HashMap<String, DataSource>,
}

impl ConnectionRegistry {
    /// An empty registry; populate with the `register_*` methods before
    /// sharing it with request handling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-loaded catalogs (the usual path when
    /// a configuration loader produced them).
    pub fn from_catalogs(
        composite: HashMap<String, String>,
        direct: HashMap<String, DataSource>,
    ) -> Self {
        Self { composite, direct }
    }

    /// The composite catalog key for a data source / tenant pair.
    pub fn composite_key(data_source: &str, tenant_id: &str) -> String {
        format!("{data_source}{COMPOSITE_SEPARATOR}{tenant_id}")
    }

    /// Register a composite entry under `"<dataSource>--<tenantId>"`.
    pub fn register_composite<S: Into<String>>(
        mut self,
        data_source: &str,
        tenant_id: &str,
        connection_string: S,
    ) -> Self {
        self.composite.insert(
            Self::composite_key(data_source, tenant_id),
            connection_string.into(),
        );
        self
    }

    /// Register a direct entry under the tenant id alone.
    pub fn register_tenant<S: Into<String>>(mut self, tenant_id: S, data_source: DataSource) -> Self {
        self.direct.insert(tenant_id.into(), data_source);
        self
    }

    /// Resolve through the composite scheme.
    pub fn resolve_composite(
        &self,
        data_source: &str,
        tenant_id: &str,
    ) -> Result<&str, TenancyError> {
        let key = Self::composite_key(data_source, tenant_id);
        self.composite
            .get(&key)
            .map(String::as_str)
            .ok_or_else(|| TenancyError::UnknownTenant(tenant_id.to_string()))
    }

    /// Resolve through the direct scheme.
    pub fn resolve_direct(&self, tenant_id: &str) -> Result<&str, TenancyError> {
        self.direct
            .get(tenant_id)
            .map(|ds| ds.connection_string.as_str())
            .ok_or_else(|| TenancyError::UnknownTenant(tenant_id.to_string()))
    }
}
