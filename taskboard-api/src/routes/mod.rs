/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (registration, login, refresh, email-check)
/// - `boards`: Board management endpoints
/// - `tasks`: Task management endpoints
/// - `comments`: Comment endpoints nested under tasks
use serde::Serialize;
use taskboard_shared::models::user::User;
use uuid::Uuid;

pub mod auth;
pub mod boards;
pub mod comments;
pub mod health;
pub mod tasks;

/// Public view of a user, shared by several responses
///
/// Never exposes the password hash or timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    /// User ID
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Display name
    pub fullname: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            fullname: user.fullname,
        }
    }
}
