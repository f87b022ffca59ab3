use crate::config::Config;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub async fn create_pool(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // Each in-memory connection is its own database, so pin it to one.
    let in_memory = config.database_url.contains(":memory:");
    let mut pool_options = SqlitePoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(30));
    pool_options = if in_memory {
        pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.database_max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    Ok(pool)
}
