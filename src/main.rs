//! Semester Offerings service entry point.
//!
//! Loads configuration, installs logging, connects to PostgreSQL, applies
//! migrations when enabled, and reports the currently active registration.

use std::error::Error;

use semester_offerings::adapters::PostgresSchedulingStore;
use semester_offerings::config::AppConfig;
use semester_offerings::ports::SchedulingStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;
    config.logging.init()?;

    info!(
        max_connections = config.database.max_connections,
        "Connecting to database"
    );
    let pool = config.database.connect().await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }

    let store = PostgresSchedulingStore::new(pool);
    let mut tx = store.begin().await?;
    let active = tx.find_active_registration().await?;
    tx.rollback().await?;

    match active {
        Some(registration) => info!(
            registration_id = %registration.id(),
            semester_id = %registration.semester(),
            status = %registration.status(),
            "Active semester registration"
        ),
        None => info!("No active semester registration"),
    }

    Ok(())
}
