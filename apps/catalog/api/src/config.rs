use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::common::RetryConfig;
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` and `database` libraries
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    /// Startup connect policy (fixed delay between attempts)
    pub retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Insert the seed catalog into an empty database at startup
    pub seed_database: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if DATABASE_URL is not set
        let retry = RetryConfig::from_env()?; // Defaults: 10 attempts, 2000ms apart
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let seed_database = env_parse("SEED_DATABASE", "true")?;

        Ok(Self {
            app: app_info!(),
            database,
            retry,
            server,
            environment,
            seed_database,
        })
    }
}
