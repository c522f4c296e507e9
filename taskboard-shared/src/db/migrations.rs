/// Schema migrations
///
/// Migrations are embedded at compile time from the crate's `migrations/`
/// directory via `sqlx::migrate!` and applied at server startup. They are
/// forward-only; sqlx records applied versions in `_sqlx_migrations`.
use sqlx::PgPool;
use tracing::{info, warn};

/// Runs all pending migrations against the given pool
///
/// Safe to call on every startup; already-applied migrations are skipped.
///
/// # Errors
///
/// Returns an error if a migration fails to apply or a previously applied
/// migration's checksum no longer matches.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
