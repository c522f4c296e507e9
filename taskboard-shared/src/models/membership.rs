/// Board membership model
///
/// This module is the single source of truth for the question "may this
/// user see this board?". Every service answers it through
/// [`Membership::is_member`] / [`Membership::is_owner`]; no caller
/// re-derives membership inline.
///
/// The owner is implicitly a member of their own board and is never stored
/// in the `board_members` table, so removing rows can never strip the
/// owner's access.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE board_members (
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (board_id, user_id)
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::board::Board;
use crate::models::user::User;

/// Membership record linking a user to a board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    /// Board ID
    pub board_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Checks whether the user owns the board
    pub fn is_owner(board: &Board, user_id: Uuid) -> bool {
        board.owner_id == user_id
    }

    /// Checks whether the user may access the board
    ///
    /// True iff the user is the owner or appears in the member set.
    /// Pure lookup; never mutates anything.
    pub async fn is_member(
        pool: &PgPool,
        board: &Board,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        if Self::is_owner(board, user_id) {
            return Ok(true);
        }

        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM board_members
                WHERE board_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(board.id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Adds users to a board's member set
    ///
    /// The owner and duplicate IDs are silently skipped; the owner's access
    /// is implicit and a membership row for them would be redundant.
    pub async fn add_members(
        conn: &mut PgConnection,
        board: &Board,
        user_ids: &[Uuid],
    ) -> Result<(), sqlx::Error> {
        let members = sanitize_member_ids(board.owner_id, user_ids);
        if members.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO board_members (board_id, user_id)
            SELECT $1, unnest($2::uuid[])
            ON CONFLICT (board_id, user_id) DO NOTHING
            "#,
        )
        .bind(board.id)
        .bind(&members)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Replaces a board's member set with the given user IDs
    ///
    /// Must run inside the caller's transaction so a failed insert cannot
    /// leave the board with an empty member list.
    pub async fn replace_members(
        conn: &mut PgConnection,
        board: &Board,
        user_ids: &[Uuid],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM board_members WHERE board_id = $1")
            .bind(board.id)
            .execute(&mut *conn)
            .await?;

        Self::add_members(conn, board, user_ids).await
    }

    /// Lists a board's members with their user records, oldest first
    ///
    /// Does not include the implicit owner.
    pub async fn list_users(pool: &PgPool, board_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.fullname, u.password_hash,
                   u.created_at, u.updated_at, u.last_login_at
            FROM users u
            JOIN board_members m ON m.user_id = u.id
            WHERE m.board_id = $1
            ORDER BY m.created_at, u.id
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
    }
}

/// Deduplicates a member ID list and drops the owner
fn sanitize_member_ids(owner_id: Uuid, ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::new();
    ids.iter()
        .copied()
        .filter(|id| *id != owner_id && seen.insert(*id))
        .collect()
}
