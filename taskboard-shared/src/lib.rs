//! # Taskboard Shared Library
//!
//! Shared types and business logic for the taskboard backend: database
//! models, the board membership/authorization core, and authentication
//! primitives (password hashing, JWT issuance).
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, boards, memberships, tasks, comments)
//! - `auth`: Password hashing, JWT tokens, authorization checks
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
