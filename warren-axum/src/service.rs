//! The tenant resolution pipeline stage.
//!
//! Per request: decide whether tenancy is active, apply path bypass rules,
//! read the tenant-carrying header, decode and/or resolve, publish the
//! result through request extensions, forward. Every failure short-circuits
//! with an error response; downstream responses pass through unchanged.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use tower::Service;
use warren_core::{ConnectionRegistry, MultiTenancy, TenancyError, TenantConnection, TenantId};
use warren_token::TokenCodec;

use crate::error::TenancyRejection;
use crate::options::{AddressingMode, TenancyOptions};

/// Shared, immutable state behind the layer: settings, catalogs, codec.
/// Built once at startup, read concurrently by every in-flight request.
pub(crate) struct TenancyState {
    pub(crate) settings: MultiTenancy,
    pub(crate) registry: ConnectionRegistry,
    pub(crate) codec: Option<TokenCodec>,
    pub(crate) options: TenancyOptions,
}

impl TenancyState {
    /// Run header check → decode → resolve for one request.
    fn resolve(&self, req: &Request) -> Result<(TenantId, TenantConnection), TenancyRejection> {
        let header = self.options.mode.tenant_header();
        match &self.options.mode {
            AddressingMode::Token { data_source } => {
                let raw = header_value(req, header).ok_or_else(|| {
                    TenancyRejection::new(TenancyError::MissingHeader(header.to_string()))
                })?;
                let codec = self.codec.as_ref().ok_or_else(|| {
                    TenancyRejection::new(TenancyError::Configuration(
                        "token codec is not configured".to_string(),
                    ))
                })?;
                let tenant_id = codec
                    .decode(raw)
                    .map_err(|e| TenancyRejection::new(e.into()))?;
                let connection = self
                    .registry
                    .resolve_composite(data_source, &tenant_id)
                    .map_err(TenancyRejection::new)?;
                Ok((
                    TenantId::new(tenant_id),
                    TenantConnection::resolved(connection),
                ))
            }
            AddressingMode::Header => {
                // The plain-header variant's missing-header body has no
                // `Error: ` prefix; that exact string is a compatibility
                // contract.
                let raw = header_value(req, header).ok_or_else(|| {
                    TenancyRejection::bare(TenancyError::MissingHeader(header.to_string()))
                })?;
                let connection = self
                    .registry
                    .resolve_direct(raw)
                    .map_err(TenancyRejection::new)?;
                Ok((TenantId::new(raw), TenantConnection::resolved(connection)))
            }
        }
    }
}

/// A present, non-empty header value. Absent, empty, whitespace-only, and
/// non-UTF-8 values all count as missing.
fn header_value<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    let value = req.headers().get(name)?.to_str().ok()?.trim();
    (!value.is_empty()).then_some(value)
}

/// Tower service wrapping an inner service with tenant resolution.
#[derive(Clone)]
pub struct TenancyService<S> {
    inner: S,
    state: Arc<TenancyState>,
}

impl<S> TenancyService<S> {
    pub(crate) fn new(inner: S, state: Arc<TenancyState>) -> Self {
        Self { inner, state }
    }
}

impl<S> Service<Request> for TenancyService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let mut inner = self.inner.clone();
        let state = Arc::clone(&self.state);

        Box::pin(async move {
            if !state.settings.enabled {
                return inner.call(req).await;
            }

            let path = req.uri().path();
            if state.options.is_bypass(path) {
                tracing::debug!(%path, "tenant resolution bypassed");
                return inner.call(req).await;
            }

            match state.resolve(&req) {
                Ok((tenant_id, connection)) => {
                    tracing::debug!(tenant = %tenant_id, "tenant resolved");
                    req.extensions_mut().insert(tenant_id);
                    req.extensions_mut().insert(connection);
                    inner.call(req).await
                }
                Err(rejection) => {
                    tracing::warn!(error = %rejection.error(), "tenant resolution failed");
                    Ok(rejection.into_response())
                }
            }
        })
    }
}
