//! Core multi-tenant types for Warren.

use std::fmt;

/// A tenant identifier.
/// Opaque: matched byte-for-byte against registry keys, no structural
/// constraints assumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(pub String);

impl TenantId {
    /// Convenience constructor from a string.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The connection target resolved for one request.
///
/// Created fresh per request by the pipeline stage, written exactly once,
/// then read by downstream request handling (in axum: via request
/// extensions). Never shared or reused across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantConnection {
    connection_string: String,
}

impl TenantConnection {
    /// An unresolved context with an empty connection string.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context already carrying its resolved connection string.
    pub fn resolved<S: Into<String>>(connection_string: S) -> Self {
        Self {
            connection_string: connection_string.into(),
        }
    }

    /// Write the resolved connection string. By convention only the
    /// pipeline stage calls this; everything downstream reads.
    pub fn set<S: Into<String>>(&mut self, connection_string: S) {
        self.connection_string = connection_string.into();
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Whether a connection target has been written. Downstream code must
    /// tolerate `false` when multi-tenancy is disabled.
    pub fn is_resolved(&self) -> bool {
        !self.connection_string.is_empty()
    }
}
