/// HTTP middleware
///
/// Middleware applied to the router in `app.rs`:
/// - `auth`: JWT bearer authentication, injects `AuthContext` into requests

pub mod auth;
