//! Tower layer wiring the pipeline stage into a router.

use std::sync::Arc;

use tower::Layer;
use warren_core::{ConnectionRegistry, MultiTenancy, TenancyError};
use warren_token::TokenCodec;

use crate::options::{AddressingMode, TenancyOptions};
use crate::service::{TenancyService, TenancyState};

/// Tower layer for per-request tenant resolution.
///
/// Construction validates the configuration: tenancy enabled without a
/// usable sign key is a fatal startup error, so it surfaces here rather
/// than on the first request.
#[derive(Clone)]
pub struct TenancyLayer {
    state: Arc<TenancyState>,
}

impl TenancyLayer {
    pub fn new(
        settings: MultiTenancy,
        registry: ConnectionRegistry,
        options: TenancyOptions,
    ) -> Result<Self, TenancyError> {
        settings.validate()?;
        options.validate()?;

        let codec = if settings.enabled && matches!(options.mode, AddressingMode::Token { .. }) {
            Some(TokenCodec::new(settings.sign_key()?, options.token.clone()))
        } else {
            None
        };

        Ok(Self {
            state: Arc::new(TenancyState {
                settings,
                registry,
                codec,
                options,
            }),
        })
    }
}

impl<S> Layer<S> for TenancyLayer {
    type Service = TenancyService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TenancyService::new(inner, Arc::clone(&self.state))
    }
}
