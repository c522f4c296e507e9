/// Integration tests for the task board API
///
/// These tests verify the full system works end-to-end:
/// - Authentication (registration, login, token refresh)
/// - Board lifecycle and membership-based access control
/// - Task lifecycle including the immutable board assignment
/// - Comment creation and author-only deletion
///
/// Tests marked `#[ignore]` need a running PostgreSQL (DATABASE_URL);
/// the rest run against a router whose pool is never connected.
mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use serde_json::json;
use tower::Service as _;

fn due_date() -> String {
    "2027-01-31".to_string()
}

/// Requests without an Authorization header are rejected before any
/// database access.
#[tokio::test]
async fn test_missing_auth_header() {
    let mut app = common::lazy_app();

    let request = Request::builder()
        .method("GET")
        .uri("/v1/boards")
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A non-Bearer Authorization header is rejected.
#[tokio::test]
async fn test_malformed_auth_header() {
    let mut app = common::lazy_app();

    let request = Request::builder()
        .method("GET")
        .uri("/v1/boards")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A syntactically invalid token is rejected.
#[tokio::test]
async fn test_invalid_token() {
    let mut app = common::lazy_app();

    let response = app
        .call(common::empty_request(
            "GET",
            "/v1/boards",
            "Bearer not-a-jwt",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A refresh token must not pass as an access token.
#[tokio::test]
async fn test_refresh_token_rejected_as_access_token() {
    use taskboard_shared::auth::jwt::{create_token, Claims, TokenType};

    let mut app = common::lazy_app();

    let claims = Claims::new(uuid::Uuid::new_v4(), TokenType::Refresh);
    let token = create_token(&claims, common::TEST_JWT_SECRET).unwrap();

    let response = app
        .call(common::empty_request(
            "GET",
            "/v1/boards",
            &format!("Bearer {}", token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Registration payloads are validated before any database access.
#[tokio::test]
async fn test_registration_validation() {
    let mut app = common::lazy_app();

    // Short password
    let request = Request::builder()
        .method("POST")
        .uri("/v1/auth/registration")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "fullname": "Test User",
                "email": "user@example.com",
                "password": "short",
                "repeated_password": "short"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Password mismatch
    let request = Request::builder()
        .method("POST")
        .uri("/v1/auth/registration")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "fullname": "Test User",
                "email": "user@example.com",
                "password": "long-enough-password",
                "repeated_password": "different-password"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = common::response_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

/// Full registration and login flow.
#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_register_and_login() {
    let ctx = TestContext::new().await.unwrap();
    let email = format!("register-{}@example.com", uuid::Uuid::new_v4());

    let request = Request::builder()
        .method("POST")
        .uri("/v1/auth/registration")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "fullname": "Fresh User",
                "email": email,
                "password": "a-strong-password",
                "repeated_password": "a-strong-password"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::response_json(response).await;
    assert!(body["token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert_eq!(body["fullname"], "Fresh User");

    // Registering the same email again fails validation
    let request = Request::builder()
        .method("POST")
        .uri("/v1/auth/registration")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "fullname": "Fresh User",
                "email": email,
                "password": "a-strong-password",
                "repeated_password": "a-strong-password"
            })
            .to_string(),
        ))
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Login with the right password
    let request = Request::builder()
        .method("POST")
        .uri("/v1/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": email, "password": "a-strong-password" }).to_string(),
        ))
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    // Wrong password is a 401
    let request = Request::builder()
        .method("POST")
        .uri("/v1/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": email, "password": "wrong-password" }).to_string(),
        ))
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Refresh yields a new access token
    let request = Request::builder()
        .method("POST")
        .uri("/v1/auth/refresh")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "refresh_token": refresh_token }).to_string(),
        ))
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert!(body["token"].is_string());

    ctx.cleanup().await.unwrap();
}

/// Email lookup requires auth and 404s for unknown addresses.
#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_email_check() {
    let ctx = TestContext::new().await.unwrap();

    let uri = format!("/v1/auth/email-check?email={}", ctx.user.email);
    let response = ctx
        .app
        .clone()
        .call(common::empty_request("GET", &uri, &ctx.auth_header()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["id"], ctx.user.id.to_string());
    assert_eq!(body["fullname"], ctx.user.fullname);
    assert!(body.get("password_hash").is_none());

    // Unknown email
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "GET",
            "/v1/auth/email-check?email=nobody@example.com",
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // No token
    let request = Request::builder()
        .method("GET")
        .uri("/v1/auth/email-check?email=whoever@example.com")
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// Board lifecycle: create, list with aggregates, detail, update, delete.
#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_board_lifecycle() {
    let ctx = TestContext::new().await.unwrap();
    let member = common::create_test_user(&ctx.db, "Board Member").await.unwrap();

    // Create with one member
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/boards",
            &ctx.auth_header(),
            json!({ "title": "Sprint 1", "members": [member.id] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::response_json(response).await;
    let board_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["title"], "Sprint 1");
    assert_eq!(body["member_count"], 1);
    assert_eq!(body["ticket_count"], 0);

    // Owner and member both see the board in their listings
    for auth in [ctx.auth_header(), ctx.auth_header_for(member.id)] {
        let response = ctx
            .app
            .clone()
            .call(common::empty_request("GET", "/v1/boards", &auth))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let boards = common::response_json(response).await;
        assert!(boards
            .as_array()
            .unwrap()
            .iter()
            .any(|b| b["id"] == board_id.as_str()));
    }

    // A stranger gets a 403 on the detail view
    let stranger = common::create_test_user(&ctx.db, "Stranger").await.unwrap();
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "GET",
            &format!("/v1/boards/{}", board_id),
            &ctx.auth_header_for(stranger.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An absent board is a 404 even for the stranger
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "GET",
            &format!("/v1/boards/{}", uuid::Uuid::new_v4()),
            &ctx.auth_header_for(stranger.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Member may rename the board and replace the member set
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "PATCH",
            &format!("/v1/boards/{}", board_id),
            &ctx.auth_header_for(member.id),
            json!({ "title": "Sprint 2", "members": [member.id, stranger.id] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["title"], "Sprint 2");
    assert_eq!(body["owner_data"]["id"], ctx.user.id.to_string());
    assert_eq!(body["members_data"].as_array().unwrap().len(), 2);

    // Unknown member IDs are rejected, not dropped
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "PATCH",
            &format!("/v1/boards/{}", board_id),
            &ctx.auth_header(),
            json!({ "members": [uuid::Uuid::new_v4()] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // A member may delete the board; a second delete is a 404
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "DELETE",
            &format!("/v1/boards/{}", board_id),
            &ctx.auth_header_for(member.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "DELETE",
            &format!("/v1/boards/{}", board_id),
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

/// Task lifecycle: create with defaults, update, board immutability,
/// personal listings, delete.
#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_task_lifecycle() {
    let ctx = TestContext::new().await.unwrap();

    // Board to put tasks on
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/boards",
            &ctx.auth_header(),
            json!({ "title": "Tasks" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let board_id = common::response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Create with defaults, assigned to the caller
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/tasks",
            &ctx.auth_header(),
            json!({
                "board": board_id,
                "title": "Write release notes",
                "assignee_id": ctx.user.id,
                "due_date": due_date()
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::response_json(response).await;
    let task_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["status"], "to-do");
    assert_eq!(body["priority"], "medium");
    assert_eq!(body["assignee"]["id"], ctx.user.id.to_string());
    assert_eq!(body["comments_count"], 0);

    // Creating on an absent board is a 404
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/tasks",
            &ctx.auth_header(),
            json!({
                "board": uuid::Uuid::new_v4(),
                "title": "Orphan",
                "due_date": due_date()
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Status and priority update; explicit null clears the assignee
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "PATCH",
            &format!("/v1/tasks/{}", task_id),
            &ctx.auth_header(),
            json!({ "status": "in-progress", "priority": "high", "assignee_id": null }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["status"], "in-progress");
    assert_eq!(body["priority"], "high");
    assert!(body["assignee"].is_null());

    // Moving the task to another board is forbidden
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "PATCH",
            &format!("/v1/tasks/{}", task_id),
            &ctx.auth_header(),
            json!({ "board": uuid::Uuid::new_v4() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Repeating the current board is a harmless no-op
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "PATCH",
            &format!("/v1/tasks/{}", task_id),
            &ctx.auth_header(),
            json!({ "board": board_id, "reviewer_id": ctx.user.id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The caller now reviews the task
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "GET",
            "/v1/tasks/reviewing",
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["id"] == task_id.as_str()));

    // And no longer appears in assigned-to-me after the null clear
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "GET",
            "/v1/tasks/assigned-to-me",
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    let body = common::response_json(response).await;
    assert!(!body
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["id"] == task_id.as_str()));

    // Delete
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "DELETE",
            &format!("/v1/tasks/{}", task_id),
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "GET",
            &format!("/v1/tasks/{}", task_id),
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

/// Comments: board members read and write, only the author deletes.
#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_comment_lifecycle() {
    let ctx = TestContext::new().await.unwrap();
    let member = common::create_test_user(&ctx.db, "Commenter").await.unwrap();

    // Board with a member, and a task on it
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/boards",
            &ctx.auth_header(),
            json!({ "title": "Discussion", "members": [member.id] }),
        ))
        .await
        .unwrap();
    let board_id = common::response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/tasks",
            &ctx.auth_header(),
            json!({ "board": board_id, "title": "Discussable", "due_date": due_date() }),
        ))
        .await
        .unwrap();
    let task_id = common::response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Member comments
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            &format!("/v1/tasks/{}/comments", task_id),
            &ctx.auth_header_for(member.id),
            json!({ "content": "Looks good to me" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::response_json(response).await;
    let comment_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["author"], "Commenter");

    // Owner sees it in the listing
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "GET",
            &format!("/v1/tasks/{}/comments", task_id),
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Board owner may not delete someone else's comment
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "DELETE",
            &format!("/v1/tasks/{}/comments/{}", task_id, comment_id),
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An absent comment is a 404, checked before authorship
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "DELETE",
            &format!("/v1/tasks/{}/comments/{}", task_id, uuid::Uuid::new_v4()),
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The author may delete
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "DELETE",
            &format!("/v1/tasks/{}/comments/{}", task_id, comment_id),
            &ctx.auth_header_for(member.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_lapsed_member_can_delete_own_comment() {
    let ctx = TestContext::new().await.unwrap();
    let member = common::create_test_user(&ctx.db, "Departing").await.unwrap();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/boards",
            &ctx.auth_header(),
            json!({ "title": "Handover", "members": [member.id] }),
        ))
        .await
        .unwrap();
    let board_id = common::response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/tasks",
            &ctx.auth_header(),
            json!({ "board": board_id, "title": "Wrap up", "due_date": due_date() }),
        ))
        .await
        .unwrap();
    let task_id = common::response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            &format!("/v1/tasks/{}/comments", task_id),
            &ctx.auth_header_for(member.id),
            json!({ "content": "Leaving this note before I go" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let comment_id = common::response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Owner removes the member from the board
    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "PATCH",
            &format!("/v1/boards/{}", board_id),
            &ctx.auth_header(),
            json!({ "members": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Authorship outlives membership: the former member still owns the
    // comment and may delete it
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "DELETE",
            &format!("/v1/tasks/{}/comments/{}", task_id, comment_id),
            &ctx.auth_header_for(member.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_board_delete_cascades_to_tasks_and_comments() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/boards",
            &ctx.auth_header(),
            json!({ "title": "Doomed" }),
        ))
        .await
        .unwrap();
    let board_id = common::response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/tasks",
            &ctx.auth_header(),
            json!({ "board": board_id, "title": "Goes down with the ship", "due_date": due_date() }),
        ))
        .await
        .unwrap();
    let task_id = common::response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            &format!("/v1/tasks/{}/comments", task_id),
            &ctx.auth_header(),
            json!({ "content": "Last words" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "DELETE",
            &format!("/v1/boards/{}", board_id),
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Task went with the board
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "GET",
            &format!("/v1/tasks/{}", task_id),
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // And so did its comment thread
    let response = ctx
        .app
        .clone()
        .call(common::empty_request(
            "GET",
            &format!("/v1/tasks/{}/comments", task_id),
            &ctx.auth_header(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_non_member_cannot_create_task_on_foreign_board() {
    let ctx = TestContext::new().await.unwrap();
    let outsider = common::create_test_user(&ctx.db, "Outsider").await.unwrap();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/boards",
            &ctx.auth_header(),
            json!({ "title": "Private" }),
        ))
        .await
        .unwrap();
    let board_id = common::response_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            "POST",
            "/v1/tasks",
            &ctx.auth_header_for(outsider.id),
            json!({ "board": board_id, "title": "Sneaking in", "due_date": due_date() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    ctx.cleanup().await.unwrap();
}
