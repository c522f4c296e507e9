//! Database models and data structures.
//!
//! Each model owns the SQL for its table and exposes static async methods
//! taking an executor (pool or open transaction). Authorization decisions
//! never live here; they are centralized in [`crate::auth::authorization`].

pub mod board;
pub mod comment;
pub mod membership;
pub mod task;
pub mod user;
