/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test configuration and router construction
/// - Test user and board creation
/// - JWT token generation
/// - Request helpers
use axum::body::Body;
use axum::http::Request;
use sqlx::PgPool;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, AuthzConfig, Config, DatabaseConfig, JwtConfig};
use taskboard_shared::auth::authorization::TaskAccessPolicy;
use taskboard_shared::auth::jwt::{create_token, Claims, TokenType};
use taskboard_shared::auth::password;
use taskboard_shared::models::user::{CreateUser, User, UserProfile};
use uuid::Uuid;

/// JWT secret used by all tests (32+ bytes, as required by config)
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Builds a test configuration without touching the environment
pub fn test_config(database_url: &str) -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: database_url.to_string(),
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        authz: AuthzConfig {
            task_access_policy: TaskAccessPolicy::Members,
        },
    }
}

/// Builds a router over a lazy pool that never connects
///
/// Good enough for tests that are rejected before any database access,
/// such as authentication failures.
pub fn lazy_app() -> axum::Router {
    let config = test_config("postgresql://localhost:5432/taskboard_test");
    let pool = PgPool::connect_lazy(&config.database.url).expect("lazy pool");
    build_router(AppState::new(pool, config))
}

/// Test context backed by a real database
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context against DATABASE_URL
    ///
    /// Runs migrations and registers a fresh user with a unique email,
    /// so contexts do not interfere with each other.
    pub async fn new() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost:5432/taskboard_test".to_string());
        let config = test_config(&database_url);

        let db = PgPool::connect(&database_url).await?;

        // Path is relative to Cargo.toml, not this file
        sqlx::migrate!("../taskboard-shared/migrations").run(&db).await?;

        let user = create_test_user(&db, "Test User").await?;

        let claims = Claims::new(user.id, TokenType::Access);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            jwt_token,
        })
    }

    /// Returns authorization header value for the context's user
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Returns an authorization header for an arbitrary user
    pub fn auth_header_for(&self, user_id: Uuid) -> String {
        let claims = Claims::new(user_id, TokenType::Access);
        let token = create_token(&claims, &self.config.jwt.secret).expect("token");
        format!("Bearer {}", token)
    }

    /// Cleans up test data
    ///
    /// Deleting the user cascades to owned boards, their tasks, and
    /// their comments.
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(self.user.id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Creates a user with a unique email and an empty profile
pub async fn create_test_user(db: &PgPool, fullname: &str) -> anyhow::Result<User> {
    let password_hash = password::hash_password("test-password")?;

    let mut tx = db.begin().await?;
    let user = User::create(
        &mut *tx,
        CreateUser {
            email: format!("test-{}@example.com", Uuid::new_v4()),
            fullname: fullname.to_string(),
            password_hash,
        },
    )
    .await?;
    UserProfile::create(&mut *tx, user.id).await?;
    tx.commit().await?;

    Ok(user)
}

/// Builds a JSON request with an authorization header
pub fn json_request(method: &str, uri: &str, auth: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", auth)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Builds a bodyless request with an authorization header
pub fn empty_request(method: &str, uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", auth)
        .body(Body::empty())
        .expect("request")
}

/// Reads a response body as JSON
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json body")
}
