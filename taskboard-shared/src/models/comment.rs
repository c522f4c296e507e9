/// Comment model and database operations
///
/// Comments form a task's discussion thread. Author, task, and creation
/// timestamp are all fixed at creation; the only mutation is deletion,
/// which the authorization layer restricts to the author.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     author_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     content TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Comment record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID
    pub id: Uuid,

    /// Task this comment belongs to, immutable
    pub task_id: Uuid,

    /// Author, set at creation from the authenticated user, immutable
    pub author_id: Uuid,

    /// Comment text
    pub content: String,

    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

/// Comment row joined with the author's display name, for view rendering
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentWithAuthor {
    /// Comment ID
    pub id: Uuid,

    /// Comment text
    pub content: String,

    /// When the comment was created
    pub created_at: DateTime<Utc>,

    /// Author user ID
    pub author_id: Uuid,

    /// Author display name
    pub author_fullname: String,
}

impl Comment {
    /// Creates a comment authored by `author_id` on `task_id`
    pub async fn create(
        pool: &PgPool,
        task_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<CommentWithAuthor, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (task_id, author_id, content)
                VALUES ($1, $2, $3)
                RETURNING id, author_id, content, created_at
            )
            SELECT i.id, i.content, i.created_at, i.author_id, u.fullname AS author_fullname
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(task_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// Finds a comment by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "SELECT id, task_id, author_id, content, created_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a task's comments with author names, creation time ascending
    pub async fn list_by_task(
        pool: &PgPool,
        task_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.content, c.created_at, c.author_id, u.fullname AS author_fullname
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.task_id = $1
            ORDER BY c.created_at, c.id
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }

    /// Deletes a comment
    ///
    /// Returns true if a comment was deleted. Authorship must already have
    /// been checked by the caller.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
