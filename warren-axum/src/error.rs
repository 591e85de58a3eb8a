//! HTTP rendering for tenancy failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use warren_core::TenancyError;

/// A terminal resolution failure, ready to be rendered as the plain-text
/// wire shape (`Error: <message>`).
///
/// Messages come from [`TenancyError`], which is written to be
/// client-safe; nothing else from the failure path reaches the body.
#[derive(Debug)]
pub struct TenancyRejection {
    error: TenancyError,
    bare: bool,
}

impl TenancyRejection {
    pub fn new(error: TenancyError) -> Self {
        Self { error, bare: false }
    }

    /// Render the message without the `Error: ` prefix. Used for the
    /// plain-header variant's missing-header response, whose exact body is
    /// a compatibility contract.
    pub fn bare(error: TenancyError) -> Self {
        Self { error, bare: true }
    }

    pub fn error(&self) -> &TenancyError {
        &self.error
    }
}

impl From<TenancyError> for TenancyRejection {
    fn from(error: TenancyError) -> Self {
        Self::new(error)
    }
}

impl IntoResponse for TenancyRejection {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = if self.bare {
            self.error.to_string()
        } else {
            format!("Error: {}", self.error)
        };
        (status, body).into_response()
    }
}
