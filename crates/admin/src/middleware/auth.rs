//! Authentication extractors for admin.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::session::load_gate;

/// Extractor that requires the session to be logged in as admin.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_admin: RequireAdmin) -> impl IntoResponse {
///     "only admins see this"
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

/// Error returned when admin login is required but missing.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// The session is not logged in as admin.
    Unauthorized,
    /// The session could not be read.
    SessionUnavailable,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "admin login required" })),
            )
                .into_response(),
            Self::SessionUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let gate = load_gate(session).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read admin session");
            AdminAuthRejection::SessionUnavailable
        })?;

        if gate.is_admin() {
            Ok(Self)
        } else {
            Err(AdminAuthRejection::Unauthorized)
        }
    }
}
