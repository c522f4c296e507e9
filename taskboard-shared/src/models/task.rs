/// Task model and database operations
///
/// A task belongs to exactly one board for its entire lifetime: `board_id`
/// is set at creation and no update statement in this module touches it.
/// Assignee and reviewer are optional user references that survive the
/// user leaving the board (task history is not erased), and are nulled out
/// if the user account itself disappears.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('to-do', 'in-progress', 'review', 'done');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'to-do',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     assignee_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     reviewer_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     due_date DATE NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Workflow column of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    ToDo,

    /// Being worked on
    InProgress,

    /// Awaiting review
    Review,

    /// Finished
    Done,
}

impl TaskStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "to-do",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }
}

/// Priority level of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority
    Low,

    /// Default priority
    #[default]
    Medium,

    /// High priority
    High,
}

impl TaskPriority {
    /// Converts priority to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning board, immutable after creation
    pub board_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority level
    pub priority: TaskPriority,

    /// Assigned user, if any
    pub assignee_id: Option<Uuid>,

    /// Reviewing user, if any
    pub reviewer_id: Option<Uuid>,

    /// Deadline
    pub due_date: NaiveDate,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Target board
    pub board_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status (defaults to to-do)
    pub status: TaskStatus,

    /// Priority (defaults to medium)
    pub priority: TaskPriority,

    /// Optional assignee
    pub assignee_id: Option<Uuid>,

    /// Optional reviewer
    pub reviewer_id: Option<Uuid>,

    /// Deadline
    pub due_date: NaiveDate,
}

/// Input for partially updating a task
///
/// `None` leaves a field untouched. For the nullable user references the
/// outer Option distinguishes "not sent" from an explicit null that clears
/// the field. The board reference is deliberately absent: it cannot be
/// changed by any update.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New workflow status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// Assignee change (Some(None) clears)
    pub assignee_id: Option<Option<Uuid>>,

    /// Reviewer change (Some(None) clears)
    pub reviewer_id: Option<Option<Uuid>>,

    /// New deadline
    pub due_date: Option<NaiveDate>,
}

/// Task row joined with assignee/reviewer user info and comment count
///
/// Backs the detail and list views so a board full of tasks renders with a
/// single query instead of per-task user lookups.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskDetail {
    /// Task ID
    pub id: Uuid,

    /// Owning board
    pub board_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority level
    pub priority: TaskPriority,

    /// Deadline
    pub due_date: NaiveDate,

    /// Assignee user ID, if assigned
    pub assignee_id: Option<Uuid>,

    /// Assignee email
    pub assignee_email: Option<String>,

    /// Assignee display name
    pub assignee_fullname: Option<String>,

    /// Reviewer user ID, if set
    pub reviewer_id: Option<Uuid>,

    /// Reviewer email
    pub reviewer_email: Option<String>,

    /// Reviewer display name
    pub reviewer_fullname: Option<String>,

    /// Number of comments on this task
    pub comments_count: i64,
}

const DETAIL_SELECT: &str = r#"
    SELECT t.id, t.board_id, t.title, t.description, t.status, t.priority, t.due_date,
           a.id AS assignee_id, a.email AS assignee_email, a.fullname AS assignee_fullname,
           r.id AS reviewer_id, r.email AS reviewer_email, r.fullname AS reviewer_fullname,
           (SELECT COUNT(*) FROM comments c WHERE c.task_id = t.id) AS comments_count
    FROM tasks t
    LEFT JOIN users a ON a.id = t.assignee_id
    LEFT JOIN users r ON r.id = t.reviewer_id
"#;

impl Task {
    /// Creates a new task on a board
    ///
    /// Membership of the target board must already have been checked by
    /// the caller through the authorization layer.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (board_id, title, description, status, priority,
                               assignee_id, reviewer_id, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, board_id, title, description, status, priority,
                      assignee_id, reviewer_id, due_date, created_at, updated_at
            "#,
        )
        .bind(data.board_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.assignee_id)
        .bind(data.reviewer_id)
        .bind(data.due_date)
        .fetch_one(pool)
        .await
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, board_id, title, description, status, priority,
                   assignee_id, reviewer_id, due_date, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Fetches the detail view of a single task
    pub async fn find_detail(pool: &PgPool, id: Uuid) -> Result<Option<TaskDetail>, sqlx::Error> {
        sqlx::query_as::<_, TaskDetail>(&format!("{DETAIL_SELECT} WHERE t.id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lists all tasks on a board, detail view, oldest first
    pub async fn list_by_board(
        pool: &PgPool,
        board_id: Uuid,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        sqlx::query_as::<_, TaskDetail>(&format!(
            "{DETAIL_SELECT} WHERE t.board_id = $1 ORDER BY t.created_at, t.id"
        ))
        .bind(board_id)
        .fetch_all(pool)
        .await
    }

    /// Lists all tasks assigned to a user, across all boards
    ///
    /// Membership is deliberately not consulted: assignment history is
    /// kept even if the user has since left the board.
    pub async fn list_by_assignee(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        sqlx::query_as::<_, TaskDetail>(&format!(
            "{DETAIL_SELECT} WHERE t.assignee_id = $1 ORDER BY t.created_at, t.id"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Lists all tasks a user is reviewing, across all boards
    pub async fn list_by_reviewer(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        sqlx::query_as::<_, TaskDetail>(&format!(
            "{DETAIL_SELECT} WHERE t.reviewer_id = $1 ORDER BY t.created_at, t.id"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Applies a partial update to a task
    ///
    /// The board reference is never part of the update statement, so the
    /// task's board cannot change regardless of what the caller passes.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        update: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let assignee_touched = update.assignee_id.is_some();
        let assignee = update.assignee_id.flatten();
        let reviewer_touched = update.reviewer_id.is_some();
        let reviewer = update.reviewer_id.flatten();

        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                due_date = COALESCE($6, due_date),
                assignee_id = CASE WHEN $7 THEN $8 ELSE assignee_id END,
                reviewer_id = CASE WHEN $9 THEN $10 ELSE reviewer_id END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, board_id, title, description, status, priority,
                      assignee_id, reviewer_id, due_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.title)
        .bind(update.description)
        .bind(update.status)
        .bind(update.priority)
        .bind(update.due_date)
        .bind(assignee_touched)
        .bind(assignee)
        .bind(reviewer_touched)
        .bind(reviewer)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a task, cascading to its comments
    ///
    /// Returns true if a task was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
