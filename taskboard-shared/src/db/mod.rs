//! Database access layer: connection pool and schema migrations.

pub mod migrations;
pub mod pool;
