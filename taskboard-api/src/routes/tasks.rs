/// Task management endpoints
///
/// Tasks live on exactly one board; access is governed by the board's
/// membership under the configured task access policy. The board
/// assignment is fixed at creation and any attempt to move a task to
/// another board is rejected.
///
/// # Endpoints
///
/// - `POST   /v1/tasks` - Create a task
/// - `GET    /v1/tasks/assigned-to-me` - Tasks assigned to the caller
/// - `GET    /v1/tasks/reviewing` - Tasks the caller is reviewing
/// - `GET    /v1/tasks/:id` - Task detail
/// - `PATCH  /v1/tasks/:id` - Partial update
/// - `DELETE /v1/tasks/:id` - Delete a task
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::AuthContext,
    routes::UserView,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use taskboard_shared::{
    auth::authorization,
    models::{
        task::{CreateTask, Task, TaskDetail, TaskPriority, TaskStatus, UpdateTask},
        user::User,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Target board ID
    pub board: Uuid,

    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status (defaults to to-do)
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional assignee user ID
    pub assignee_id: Option<Uuid>,

    /// Optional reviewer user ID
    pub reviewer_id: Option<Uuid>,

    /// Deadline
    pub due_date: NaiveDate,
}

/// Partial update request
///
/// Absent fields are left untouched. For `assignee_id` and `reviewer_id`
/// an explicit JSON null clears the field, which is why they use the
/// double-Option deserializer. The `board` field is accepted only as a
/// no-op repetition of the task's current board.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// Board ID; must match the task's board if present
    pub board: Option<Uuid>,

    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New workflow status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// Assignee change (null clears)
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assignee_id: Option<Option<Uuid>>,

    /// Reviewer change (null clears)
    #[serde(default, deserialize_with = "deserialize_some")]
    pub reviewer_id: Option<Option<Uuid>>,

    /// New deadline
    pub due_date: Option<NaiveDate>,
}

/// Distinguishes an absent field from an explicit null
///
/// With `#[serde(default)]` an absent field stays `None`; a present
/// field (null included) becomes `Some(...)`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Task response
///
/// Assignee and reviewer are expanded to user info; `board` carries the
/// owning board's ID.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// Task ID
    pub id: Uuid,

    /// Owning board ID
    pub board: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority level
    pub priority: TaskPriority,

    /// Assignee info, if assigned
    pub assignee: Option<UserView>,

    /// Reviewer info, if set
    pub reviewer: Option<UserView>,

    /// Deadline
    pub due_date: NaiveDate,

    /// Number of comments
    pub comments_count: i64,
}

impl From<TaskDetail> for TaskResponse {
    fn from(detail: TaskDetail) -> Self {
        let assignee = match (
            detail.assignee_id,
            detail.assignee_email,
            detail.assignee_fullname,
        ) {
            (Some(id), Some(email), Some(fullname)) => Some(UserView {
                id,
                email,
                fullname,
            }),
            _ => None,
        };

        let reviewer = match (
            detail.reviewer_id,
            detail.reviewer_email,
            detail.reviewer_fullname,
        ) {
            (Some(id), Some(email), Some(fullname)) => Some(UserView {
                id,
                email,
                fullname,
            }),
            _ => None,
        };

        Self {
            id: detail.id,
            board: detail.board_id,
            title: detail.title,
            description: detail.description,
            status: detail.status,
            priority: detail.priority,
            assignee,
            reviewer,
            due_date: detail.due_date,
            comments_count: detail.comments_count,
        }
    }
}

/// Rejects assignee/reviewer references to unknown users
async fn validate_user_refs(
    state: &AppState,
    assignee_id: Option<Uuid>,
    reviewer_id: Option<Uuid>,
) -> ApiResult<()> {
    let ids: Vec<Uuid> = assignee_id.into_iter().chain(reviewer_id).collect();
    if ids.is_empty() {
        return Ok(());
    }

    let existing = User::find_existing_ids(&state.db, &ids).await?;

    if let Some(id) = assignee_id {
        if !existing.contains(&id) {
            return Err(ApiError::validation("assignee_id", "Unknown user ID"));
        }
    }
    if let Some(id) = reviewer_id {
        if !existing.contains(&id) {
            return Err(ApiError::validation("reviewer_id", "Unknown user ID"));
        }
    }

    Ok(())
}

/// Loads the detail view after a mutation
async fn detail_response(state: &AppState, task_id: Uuid) -> ApiResult<TaskResponse> {
    let detail = Task::find_detail(&state.db, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(TaskResponse::from(detail))
}

/// Create a task
///
/// The caller must be able to access the target board. Status defaults
/// to to-do and priority to medium when omitted.
///
/// # Errors
///
/// - `404 Not Found`: Board does not exist
/// - `403 Forbidden`: Caller may not access the board
/// - `422 Unprocessable Entity`: Validation failed or unknown user IDs
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate().map_err(ApiError::from_validation)?;

    // Existence is checked before permission, then member/user refs
    authorization::require_board_access(&state.db, req.board, auth.user_id).await?;
    validate_user_refs(&state, req.assignee_id, req.reviewer_id).await?;

    let task = Task::create(
        &state.db,
        CreateTask {
            board_id: req.board,
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            assignee_id: req.assignee_id,
            reviewer_id: req.reviewer_id,
            due_date: req.due_date,
        },
    )
    .await?;

    let response = detail_response(&state, task.id).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Tasks assigned to the caller, across all boards
pub async fn list_assigned_to_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = Task::list_by_assignee(&state.db, auth.user_id).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Tasks the caller is reviewing, across all boards
pub async fn list_reviewing(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = Task::list_by_reviewer(&state.db, auth.user_id).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Task detail
///
/// # Errors
///
/// - `404 Not Found`: Task does not exist
/// - `403 Forbidden`: Policy denies the caller
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let task = authorization::require_task(&state.db, id).await?;

    authorization::require_task_access(&state.db, &task, auth.user_id, state.task_access_policy())
        .await?;

    let response = detail_response(&state, task.id).await?;

    Ok(Json(response))
}

/// Partially update a task
///
/// A `board` field in the payload is rejected unless it repeats the
/// task's current board. Explicit nulls clear assignee and reviewer.
///
/// # Errors
///
/// - `404 Not Found`: Task does not exist
/// - `403 Forbidden`: Policy denies the caller, or the payload tries to
///   move the task to another board
/// - `422 Unprocessable Entity`: Validation failed or unknown user IDs
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let task = authorization::require_task(&state.db, id).await?;

    authorization::require_task_access(&state.db, &task, auth.user_id, state.task_access_policy())
        .await?;
    authorization::ensure_board_unchanged(&task, req.board)?;

    validate_user_refs(
        &state,
        req.assignee_id.flatten(),
        req.reviewer_id.flatten(),
    )
    .await?;

    Task::update(
        &state.db,
        task.id,
        UpdateTask {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            assignee_id: req.assignee_id,
            reviewer_id: req.reviewer_id,
            due_date: req.due_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let response = detail_response(&state, task.id).await?;

    Ok(Json(response))
}

/// Delete a task
///
/// Cascades to the task's comments.
///
/// # Errors
///
/// - `404 Not Found`: Task does not exist
/// - `403 Forbidden`: Policy denies the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let task = authorization::require_task(&state.db, id).await?;

    authorization::require_task_access(&state.db, &task, auth.user_id, state.task_access_policy())
        .await?;

    Task::delete(&state.db, task.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
