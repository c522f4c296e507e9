/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::auth::authorization::TaskAccessPolicy;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Gets the configured task access policy
    pub fn task_access_policy(&self) -> TaskAccessPolicy {
        self.config.authz.task_access_policy
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// ├── /v1/                             # API v1 (versioned)
/// │   ├── /auth/
/// │   │   ├── POST /registration       # Create account (public)
/// │   │   ├── POST /login              # Obtain tokens (public)
/// │   │   ├── POST /refresh            # Refresh access token (public)
/// │   │   └── GET  /email-check        # Look up user by email (authenticated)
/// │   ├── /boards/                     # Board management (authenticated)
/// │   │   ├── GET    /                 # List caller's boards
/// │   │   ├── POST   /                 # Create board
/// │   │   ├── GET    /:id              # Board detail with tasks
/// │   │   ├── PATCH  /:id              # Update title and members
/// │   │   └── DELETE /:id              # Delete board
/// │   └── /tasks/                      # Task management (authenticated)
/// │       ├── POST   /                 # Create task
/// │       ├── GET    /assigned-to-me   # Tasks assigned to the caller
/// │       ├── GET    /reviewing        # Tasks the caller is reviewing
/// │       ├── GET    /:id              # Task detail
/// │       ├── PATCH  /:id              # Update task
/// │       ├── DELETE /:id              # Delete task
/// │       ├── GET    /:id/comments     # List comments
/// │       ├── POST   /:id/comments     # Create comment
/// │       └── DELETE /:id/comments/:comment_id  # Delete own comment
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (per-route-group basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/registration", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    // Email lookup requires a valid token
    let auth_protected_routes = Router::new()
        .route("/email-check", get(routes::auth::email_check))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_auth,
        ));

    // Board routes (require JWT authentication)
    let board_routes = Router::new()
        .route("/", get(routes::boards::list_boards))
        .route("/", post(routes::boards::create_board))
        .route("/:id", get(routes::boards::get_board))
        .route("/:id", patch(routes::boards::update_board))
        .route("/:id", delete(routes::boards::delete_board))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_auth,
        ));

    // Task routes, including nested comments (require JWT authentication)
    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route("/assigned-to-me", get(routes::tasks::list_assigned_to_me))
        .route("/reviewing", get(routes::tasks::list_reviewing))
        .route("/:id", get(routes::tasks::get_task))
        .route("/:id", patch(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .route("/:id/comments", get(routes::comments::list_comments))
        .route("/:id/comments", post(routes::comments::create_comment))
        .route(
            "/:id/comments/:comment_id",
            delete(routes::comments::delete_comment),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_auth,
        ));

    // Build complete v1 API
    let v1_routes = Router::new()
        .nest("/auth", auth_routes.merge(auth_protected_routes))
        .nest("/boards", board_routes)
        .nest("/tasks", task_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
