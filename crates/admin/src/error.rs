//! Unified error handling for admin.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use souq_core::{CatalogError, OrderError, ShippingError, ShopUnavailable};

use crate::services::CopywriterError;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Product create/update/delete failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Shipping zone add/delete failed.
    #[error(transparent)]
    Shipping(#[from] ShippingError),

    /// Order status update failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Copywriter refused the request.
    #[error(transparent)]
    Copywriter(#[from] CopywriterError),

    /// Session store read/write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Shop state lock poisoned.
    #[error(transparent)]
    ShopUnavailable(#[from] ShopUnavailable),

    /// Password attempt did not match.
    #[error("{}", souq_core::admin::LOGIN_ERROR)]
    InvalidPassword,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type for admin handlers.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::NotFound(_))
            | Self::Shipping(ShippingError::NotFound(_))
            | Self::Order(OrderError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Catalog(_)
            | Self::Shipping(_)
            | Self::Copywriter(CopywriterError::MissingName)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Copywriter(CopywriterError::Busy) => StatusCode::CONFLICT,
            Self::InvalidPassword => StatusCode::UNAUTHORIZED,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ShopUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Session(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
