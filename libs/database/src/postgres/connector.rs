use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, RetryConfig, retry_with_delay};

async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    db.ping().await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Connect once using a PostgresConfig
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Connect from config, retrying until the database accepts connections
///
/// Each attempt opens the pool and pings the server. When the retry budget
/// is exhausted the last failure is returned as
/// [`DatabaseError::ConnectionFailed`], which callers treat as fatal.
///
/// ```ignore
/// use database::common::RetryConfig;
/// use database::postgres::{PostgresConfig, connect_from_config_with_retry};
///
/// let retry = RetryConfig::fixed(10, Duration::from_secs(2));
/// let db = connect_from_config_with_retry(config, Some(retry)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DatabaseError> {
    let retry_config = retry_config.unwrap_or_default();
    let attempts = retry_config.max_attempts;
    let options = config.into_connect_options();

    retry_with_delay(
        || {
            let opts = options.clone();
            connect_with_options(opts)
        },
        retry_config,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to connect to database after {} attempts", attempts);
        DatabaseError::ConnectionFailed {
            attempts,
            reason: e.to_string(),
        }
    })
}

/// Run database migrations using the provided Migrator
///
/// ```ignore
/// use migration::Migrator;
/// use database::postgres::run_migrations;
///
/// run_migrations::<Migrator>(&db, "catalog_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DatabaseError> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
