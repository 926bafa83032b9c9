//! Admin login/logout and the session gate
//!
//! Stateless: the session cookie is valid iff it equals the token derived
//! from the configured password (see `lwai_common::auth`).

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use lwai_common::auth::{
    cookie_value, expired_session_cookie, session_cookie, verify_password, verify_token,
    SESSION_COOKIE,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::AppState;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// POST /api/admin/auth
pub async fn login(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AuthError> {
    let Json(request) = request.map_err(|e| AuthError::InvalidBody(e.body_text()))?;

    let (Some(password), Some(token)) = (&state.admin_password, &state.session_token) else {
        warn!("Admin login attempted but no admin password is configured");
        return Err(AuthError::Disabled);
    };

    if !verify_password(&request.password, Some(&**password)) {
        warn!("Admin login failed");
        return Err(AuthError::InvalidPassword);
    }

    info!("Admin login");
    Ok((
        [(header::SET_COOKIE, session_cookie(token))],
        Json(json!({ "success": true })),
    )
        .into_response())
}

/// DELETE /api/admin/auth
pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// Session gate for admin routes
///
/// Applied to protected routes only; `/api/admin/auth` itself is public.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(expected) = state.session_token.as_deref() else {
        return Err(AuthError::Disabled);
    };

    let presented = request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookies| cookie_value(cookies, SESSION_COOKIE));

    match presented.map(|token| verify_token(token, expected)) {
        Some(true) => Ok(next.run(request).await),
        Some(false) => Err(AuthError::InvalidSession),
        None => Err(AuthError::MissingSession),
    }
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    /// No admin password configured
    Disabled,
    /// Login body missing or not `{password}`
    InvalidBody(String),
    InvalidPassword,
    MissingSession,
    InvalidSession,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Disabled => (StatusCode::UNAUTHORIZED, "Admin access is disabled".to_string()),
            AuthError::InvalidBody(msg) => {
                (StatusCode::BAD_REQUEST, format!("Invalid request: {}", msg))
            }
            AuthError::InvalidPassword => (StatusCode::UNAUTHORIZED, "Invalid password".to_string()),
            AuthError::MissingSession => (StatusCode::UNAUTHORIZED, "Not logged in".to_string()),
            AuthError::InvalidSession => (StatusCode::UNAUTHORIZED, "Invalid session".to_string()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
