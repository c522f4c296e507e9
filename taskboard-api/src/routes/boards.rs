/// Board management endpoints
///
/// Boards are visible only to their owner and members. Every handler
/// resolves access through the authorization layer before touching any
/// data, so an absent board is always a 404 and a foreign board a 403.
///
/// # Endpoints
///
/// - `GET    /v1/boards` - List the caller's boards with aggregates
/// - `POST   /v1/boards` - Create a board
/// - `GET    /v1/boards/:id` - Board detail with members and tasks
/// - `PATCH  /v1/boards/:id` - Update title and member set
/// - `DELETE /v1/boards/:id` - Delete a board (any member)
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::AuthContext,
    routes::{tasks::TaskResponse, UserView},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::authorization,
    models::{
        board::{Board, BoardSummary, CreateBoard},
        membership::Membership,
        task::Task,
        user::User,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create board request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    /// Board title
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title: String,

    /// Initial member user IDs (owner is implicit and may be omitted)
    #[serde(default)]
    pub members: Vec<Uuid>,
}

/// Update board request
///
/// Absent fields are left untouched. A present `members` list replaces
/// the whole member set.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBoardRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title: Option<String>,

    /// Replacement member set
    pub members: Option<Vec<Uuid>>,
}

/// Board detail response with members and tasks
#[derive(Debug, Serialize)]
pub struct BoardDetailResponse {
    /// Board ID
    pub id: Uuid,

    /// Board title
    pub title: String,

    /// Owning user
    pub owner_id: Uuid,

    /// Members (excluding the implicit owner)
    pub members: Vec<UserView>,

    /// Tasks on this board
    pub tasks: Vec<TaskResponse>,
}

/// Response for board updates
#[derive(Debug, Serialize)]
pub struct UpdateBoardResponse {
    /// Board ID
    pub id: Uuid,

    /// Board title
    pub title: String,

    /// Owner's user info
    pub owner_data: UserView,

    /// Members' user info (excluding the owner)
    pub members_data: Vec<UserView>,
}

/// Rejects member lists referencing unknown users
async fn validate_member_ids(state: &AppState, ids: &[Uuid]) -> ApiResult<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let existing = User::find_existing_ids(&state.db, ids).await?;
    let missing: Vec<Uuid> = ids
        .iter()
        .copied()
        .filter(|id| !existing.contains(id))
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::validation(
            "members",
            &format!("Unknown user IDs: {:?}", missing),
        ));
    }

    Ok(())
}

/// List the caller's boards
///
/// Returns every board the caller owns or is a member of, with live
/// aggregate counts, ordered by creation time.
pub async fn list_boards(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<BoardSummary>>> {
    let boards = Board::list_for_user(&state.db, auth.user_id).await?;

    Ok(Json(boards))
}

/// Create a board
///
/// The caller becomes the owner. Initial members are optional; unknown
/// user IDs are rejected rather than silently dropped.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed or unknown member IDs
pub async fn create_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<(StatusCode, Json<BoardSummary>)> {
    req.validate().map_err(ApiError::from_validation)?;
    validate_member_ids(&state, &req.members).await?;

    // Board and initial members are created atomically
    let mut tx = state.db.begin().await?;

    let board = Board::create(
        &mut *tx,
        CreateBoard {
            title: req.title,
            owner_id: auth.user_id,
        },
    )
    .await?;

    Membership::add_members(&mut *tx, &board, &req.members).await?;

    tx.commit().await?;

    let summary = Board::summary(&state.db, board.id)
        .await?
        .ok_or_else(|| ApiError::InternalError("Board vanished after creation".to_string()))?;

    Ok((StatusCode::CREATED, Json(summary)))
}

/// Board detail
///
/// Returns the board with its member list and all its tasks.
///
/// # Errors
///
/// - `404 Not Found`: Board does not exist
/// - `403 Forbidden`: Caller is neither owner nor member
pub async fn get_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BoardDetailResponse>> {
    let board = authorization::require_board_access(&state.db, id, auth.user_id).await?;

    let members = Membership::list_users(&state.db, board.id).await?;
    let tasks = Task::list_by_board(&state.db, board.id).await?;

    Ok(Json(BoardDetailResponse {
        id: board.id,
        title: board.title,
        owner_id: board.owner_id,
        members: members.into_iter().map(UserView::from).collect(),
        tasks: tasks.into_iter().map(TaskResponse::from).collect(),
    }))
}

/// Update a board's title and member set
///
/// Owner and members may edit. The owner cannot be removed: it is never
/// part of the stored member set, so replacing members cannot touch it.
///
/// # Errors
///
/// - `404 Not Found`: Board does not exist
/// - `403 Forbidden`: Caller is neither owner nor member
/// - `422 Unprocessable Entity`: Validation failed or unknown member IDs
pub async fn update_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBoardRequest>,
) -> ApiResult<Json<UpdateBoardResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let board = authorization::require_board_access(&state.db, id, auth.user_id).await?;

    if let Some(members) = &req.members {
        validate_member_ids(&state, members).await?;
    }

    // Title and member set change atomically
    let mut tx = state.db.begin().await?;

    let board = match &req.title {
        Some(title) => Board::update_title(&mut *tx, board.id, title)
            .await?
            .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?,
        None => board,
    };

    if let Some(members) = &req.members {
        Membership::replace_members(&mut *tx, &board, members).await?;
    }

    tx.commit().await?;

    let owner = User::find_by_id(&state.db, board.owner_id)
        .await?
        .ok_or_else(|| ApiError::InternalError("Board owner not found".to_string()))?;
    let members = Membership::list_users(&state.db, board.id).await?;

    Ok(Json(UpdateBoardResponse {
        id: board.id,
        title: board.title,
        owner_data: UserView::from(owner),
        members_data: members.into_iter().map(UserView::from).collect(),
    }))
}

/// Delete a board
///
/// Any member (or the owner) may delete. Cascades to the board's tasks
/// and their comments in one statement, so no partial deletion is ever
/// observable.
///
/// # Errors
///
/// - `404 Not Found`: Board does not exist
/// - `403 Forbidden`: Caller is neither owner nor member
pub async fn delete_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let board = authorization::require_board_access(&state.db, id, auth.user_id).await?;

    Board::delete(&state.db, board.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
