//! warren-core: framework-agnostic tenancy core for Warren.
//!
//! Holds the pieces that do not depend on any HTTP stack: the
//! multi-tenancy runtime settings, the tenant → connection registry,
//! the request-scoped tenant context, and the error taxonomy shared
//! by the rest of the workspace.

pub mod config;
pub mod errors;
pub mod registry;
pub mod tenant;

pub use config::{DataSource, MultiTenancy};
pub use errors::TenancyError;
pub use registry::ConnectionRegistry;
pub use tenant::{TenantConnection, TenantId};
