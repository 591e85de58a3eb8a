//! warren-axum: tenant resolution middleware for axum.
//!
//! A tower [`Layer`](tower::Layer)/`Service` pair that decides, per
//! request, which tenant the request belongs to and which connection
//! target that tenant maps to, then publishes the resolution through
//! request extensions for downstream handlers.
//!
//! Two addressing modes are supported as deployment variants:
//!
//! - **Token**: the `X-Tenant-ID` header carries a signed tenant token;
//!   the decoded id is resolved through the composite
//!   (`"<dataSource>--<tenantId>"`) catalog.
//! - **Header**: the `Tenant-Id` header carries the plain tenant id,
//!   resolved directly against the tenant catalog. No token involved.
//!
//! Documentation endpoints bypass resolution so they stay reachable
//! without tenant credentials; everything else either resolves fully or
//! is rejected before it reaches a handler.
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use warren_axum::{AddressingMode, TenancyLayer, TenancyOptions};
//! use warren_core::{ConnectionRegistry, MultiTenancy, TenantConnection};
//!
//! async fn list_orders(Extension(conn): Extension<TenantConnection>) -> String {
//!     format!("querying {}", conn.connection_string())
//! }
//!
//! let registry = ConnectionRegistry::new()
//!     .register_composite("orders", "acme", "Server=db-acme;Database=orders");
//!
//! let layer = TenancyLayer::new(
//!     MultiTenancy::enabled("a-shared-secret"),
//!     registry,
//!     TenancyOptions::default()
//!         .mode(AddressingMode::token("orders")),
//! )?;
//!
//! let app = Router::new()
//!     .route("/api/orders", get(list_orders))
//!     .layer(layer);
//! ```

pub mod error;
pub mod layer;
pub mod options;
pub mod service;

pub use error::TenancyRejection;
pub use layer::TenancyLayer;
pub use options::{AddressingMode, TenancyOptions, PLAIN_TENANT_HEADER, TOKEN_TENANT_HEADER};
pub use service::TenancyService;
