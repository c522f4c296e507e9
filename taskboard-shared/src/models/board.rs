/// Board model and database operations
///
/// A board is the unit of tenancy: it has exactly one owner (set at
/// creation, immutable) and a set of members managed through
/// [`crate::models::membership`]. Deleting a board cascades to its tasks
/// and their comments at the schema level, so the delete is atomic.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE boards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Board record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID
    pub id: Uuid,

    /// Board title
    pub title: String,

    /// Owning user, fixed at creation
    pub owner_id: Uuid,

    /// When the board was created
    pub created_at: DateTime<Utc>,

    /// When the board was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoard {
    /// Board title
    pub title: String,

    /// Creator, becomes the owner
    pub owner_id: Uuid,
}

/// Board list row with aggregate counts
///
/// Counts are computed from the live task and membership tables rather
/// than denormalized counters.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BoardSummary {
    /// Board ID
    pub id: Uuid,

    /// Board title
    pub title: String,

    /// Owning user
    pub owner_id: Uuid,

    /// Number of members (excluding the implicit owner)
    pub member_count: i64,

    /// Total number of tasks on the board
    pub ticket_count: i64,

    /// Number of tasks still in the to-do column
    pub tasks_to_do_count: i64,

    /// Number of high-priority tasks
    pub tasks_high_prio_count: i64,
}

impl Board {
    /// Creates a new board owned by `data.owner_id`
    ///
    /// Takes a connection so the caller can add initial members in the
    /// same transaction.
    pub async fn create(conn: &mut PgConnection, data: CreateBoard) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (title, owner_id)
            VALUES ($1, $2)
            RETURNING id, title, owner_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.owner_id)
        .fetch_one(conn)
        .await
    }

    /// Finds a board by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Board>(
            "SELECT id, title, owner_id, created_at, updated_at FROM boards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists all boards the user owns or is a member of, with aggregates
    ///
    /// Ordered by creation time then ID so the listing is stable.
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<BoardSummary>, sqlx::Error> {
        sqlx::query_as::<_, BoardSummary>(
            r#"
            SELECT
                b.id,
                b.title,
                b.owner_id,
                (SELECT COUNT(*) FROM board_members m WHERE m.board_id = b.id) AS member_count,
                (SELECT COUNT(*) FROM tasks t WHERE t.board_id = b.id) AS ticket_count,
                (SELECT COUNT(*) FROM tasks t
                   WHERE t.board_id = b.id AND t.status = 'to-do') AS tasks_to_do_count,
                (SELECT COUNT(*) FROM tasks t
                   WHERE t.board_id = b.id AND t.priority = 'high') AS tasks_high_prio_count
            FROM boards b
            WHERE b.owner_id = $1
               OR EXISTS (SELECT 1 FROM board_members m
                          WHERE m.board_id = b.id AND m.user_id = $1)
            ORDER BY b.created_at, b.id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Fetches the aggregate counts for a single board
    pub async fn summary(pool: &PgPool, id: Uuid) -> Result<Option<BoardSummary>, sqlx::Error> {
        sqlx::query_as::<_, BoardSummary>(
            r#"
            SELECT
                b.id,
                b.title,
                b.owner_id,
                (SELECT COUNT(*) FROM board_members m WHERE m.board_id = b.id) AS member_count,
                (SELECT COUNT(*) FROM tasks t WHERE t.board_id = b.id) AS ticket_count,
                (SELECT COUNT(*) FROM tasks t
                   WHERE t.board_id = b.id AND t.status = 'to-do') AS tasks_to_do_count,
                (SELECT COUNT(*) FROM tasks t
                   WHERE t.board_id = b.id AND t.priority = 'high') AS tasks_high_prio_count
            FROM boards b
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Renames a board
    pub async fn update_title(
        conn: &mut PgConnection,
        id: Uuid,
        title: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Board>(
            r#"
            UPDATE boards
            SET title = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_optional(conn)
        .await
    }

    /// Deletes a board, cascading to tasks and comments
    ///
    /// Returns true if a board was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
