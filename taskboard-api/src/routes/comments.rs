/// Comment endpoints, nested under tasks
///
/// Comments are the discussion thread of a task. Board members may read
/// and create them; deletion is restricted to the comment's author.
///
/// # Endpoints
///
/// - `GET    /v1/tasks/:id/comments` - List a task's comments
/// - `POST   /v1/tasks/:id/comments` - Create a comment
/// - `DELETE /v1/tasks/:id/comments/:comment_id` - Delete own comment
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::AuthContext,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::authorization,
    models::{
        comment::{Comment, CommentWithAuthor},
        task::Task,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Comment text
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
}

/// Comment response
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    /// Comment ID
    pub id: Uuid,

    /// Comment text
    pub content: String,

    /// When the comment was created
    pub created_at: DateTime<Utc>,

    /// Author's display name
    pub author: String,

    /// Author's user ID
    pub author_id: Uuid,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(comment: CommentWithAuthor) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            created_at: comment.created_at,
            author: comment.author_fullname,
            author_id: comment.author_id,
        }
    }
}

/// Loads the task and checks the caller may access its board
async fn require_task_board_access(
    state: &AppState,
    task_id: Uuid,
    user_id: Uuid,
) -> ApiResult<Task> {
    let task = authorization::require_task(&state.db, task_id).await?;

    authorization::require_board_access(&state.db, task.board_id, user_id).await?;

    Ok(task)
}

/// List a task's comments, oldest first
///
/// # Errors
///
/// - `404 Not Found`: Task does not exist
/// - `403 Forbidden`: Caller may not access the task's board
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let task = require_task_board_access(&state, task_id, auth.user_id).await?;

    let comments = Comment::list_by_task(&state.db, task.id).await?;

    Ok(Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

/// Create a comment on a task
///
/// The author is always the authenticated caller; it cannot be set in
/// the payload.
///
/// # Errors
///
/// - `404 Not Found`: Task does not exist
/// - `403 Forbidden`: Caller may not access the task's board
/// - `422 Unprocessable Entity`: Empty content
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let task = require_task_board_access(&state, task_id, auth.user_id).await?;

    let comment = Comment::create(&state.db, task.id, auth.user_id, &req.content).await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

/// Delete a comment
///
/// Existence is checked before authorship, so an absent comment is a
/// 404 no matter who asks. Authorship is the only rule: board ownership
/// grants no exception, and an author whose board membership has since
/// lapsed may still delete their own comment.
///
/// # Errors
///
/// - `404 Not Found`: Task or comment does not exist, or the comment
///   belongs to a different task
/// - `403 Forbidden`: Caller is not the author
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((task_id, comment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    let task = authorization::require_task(&state.db, task_id).await?;

    let comment = authorization::require_comment(&state.db, task.id, comment_id).await?;

    authorization::require_comment_author(&comment, auth.user_id)?;

    Comment::delete(&state.db, comment.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
