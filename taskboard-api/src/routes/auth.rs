/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
/// - Token refresh
/// - Email lookup
///
/// # Endpoints
///
/// - `POST /v1/auth/registration` - Register new user
/// - `POST /v1/auth/login` - Login and get tokens
/// - `POST /v1/auth/refresh` - Refresh access token
/// - `GET /v1/auth/email-check?email=...` - Look up a user by email (authenticated)
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::UserView,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User, UserProfile},
};
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Full name must not be empty"))]
    pub fullname: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Password confirmation, must match `password`
    pub repeated_password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Response for registration and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Access token (24h)
    pub token: String,

    /// Refresh token (30d)
    pub refresh_token: String,

    /// User ID
    pub user_id: String,

    /// Email address
    pub email: String,

    /// Display name
    pub fullname: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub token: String,
}

/// Email lookup query parameters
#[derive(Debug, Deserialize, Validate)]
pub struct EmailCheckQuery {
    /// Email address to look up
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Register a new user
///
/// Creates the account and its empty profile in one transaction and
/// returns tokens so the client is logged in immediately.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed, passwords do not
///   match, or the email is already registered
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate().map_err(ApiError::from_validation)?;

    if req.password != req.repeated_password {
        return Err(ApiError::validation(
            "repeated_password",
            "Passwords do not match",
        ));
    }

    // Pre-check so the common duplicate case reports against the field;
    // the unique index still backstops concurrent registrations.
    if User::email_exists(&state.db, &req.email).await? {
        return Err(ApiError::validation("email", "Email already exists"));
    }

    let password_hash = password::hash_password(&req.password)?;

    // User and profile are created atomically
    let mut tx = state.db.begin().await?;

    let user = User::create(
        &mut *tx,
        CreateUser {
            email: req.email,
            fullname: req.fullname,
            password_hash,
        },
    )
    .await?;

    UserProfile::create(&mut *tx, user.id).await?;

    tx.commit().await?;

    // Generate tokens
    let access_claims = jwt::Claims::new(user.id, jwt::TokenType::Access);
    let refresh_claims = jwt::Claims::new(user.id, jwt::TokenType::Refresh);

    let token = jwt::create_token(&access_claims, state.jwt_secret())?;
    let refresh_token = jwt::create_token(&refresh_claims, state.jwt_secret())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            refresh_token,
            user_id: user.id.to_string(),
            email: user.email,
            fullname: user.fullname,
        }),
    ))
}

/// Login endpoint
///
/// Authenticates a user and returns JWT tokens. The same error is
/// returned for an unknown email and a wrong password.
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    User::update_last_login(&state.db, user.id).await?;

    // Generate tokens
    let access_claims = jwt::Claims::new(user.id, jwt::TokenType::Access);
    let refresh_claims = jwt::Claims::new(user.id, jwt::TokenType::Refresh);

    let token = jwt::create_token(&access_claims, state.jwt_secret())?;
    let refresh_token = jwt::create_token(&refresh_claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        token,
        refresh_token,
        user_id: user.id.to_string(),
        email: user.email,
        fullname: user.fullname,
    }))
}

/// Token refresh endpoint
///
/// Exchanges a refresh token for a new access token.
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid or expired refresh token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let token = jwt::refresh_access_token(&req.refresh_token, state.jwt_secret())?;

    Ok(Json(RefreshResponse { token }))
}

/// Email lookup endpoint
///
/// Resolves an email address to a user, so clients can suggest members
/// while editing a board. Requires authentication.
///
/// # Errors
///
/// - `404 Not Found`: No user with this email
/// - `422 Unprocessable Entity`: Malformed email
pub async fn email_check(
    State(state): State<AppState>,
    Query(query): Query<EmailCheckQuery>,
) -> ApiResult<Json<UserView>> {
    query.validate().map_err(ApiError::from_validation)?;

    let user = User::find_by_email(&state.db, &query.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("No user with this email".to_string()))?;

    Ok(Json(UserView::from(user)))
}
