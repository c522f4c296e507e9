/// JWT authentication middleware
///
/// Validates the Bearer token from the Authorization header and adds an
/// `AuthContext` to request extensions. Handlers behind this middleware
/// extract the context with Axum's `Extension` extractor:
///
/// ```ignore
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```
use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use serde::{Deserialize, Serialize};
use taskboard_shared::auth::jwt;
use uuid::Uuid;

use crate::{app::AppState, error::ApiError};

/// Authentication context added to request extensions after a
/// successful token validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID (the token's subject)
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context for the given user
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Authentication middleware function
///
/// Extracts and validates the JWT access token, then injects
/// `AuthContext` into request extensions. Rejects requests with a
/// missing or malformed Authorization header (401) or an invalid or
/// expired token (401).
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    // Parse Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    // Validate token (must be an access token, not a refresh token)
    let claims = jwt::validate_access_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext::new(claims.sub));

    Ok(next.run(req).await)
}
