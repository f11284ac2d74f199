//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. Every error is returned as JSON
//! `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use souq_core::{CheckoutError, SelectionError, ShopUnavailable};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Checkout transition or form validation failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Size/color choice does not fit the product.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Session store read/write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Shop state lock poisoned.
    #[error(transparent)]
    ShopUnavailable(#[from] ShopUnavailable),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Checkout(CheckoutError::InvalidTransition { .. } | CheckoutError::AlreadySubmitting) => {
                StatusCode::CONFLICT
            }
            Self::Checkout(_) | Self::Selection(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ShopUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}
