//! Database migration command.

use wanderwise_core::error::AppError;

use crate::app::App;
use crate::output;

/// Apply all pending migrations.
pub async fn execute(app: &App) -> Result<(), AppError> {
    println!("Running database migrations...");
    wanderwise_database::migration::run_migrations(app.db.pool()).await?;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
