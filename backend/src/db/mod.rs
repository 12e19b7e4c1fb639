//! PostgreSQL pool and startup checks
//!
//! The schema is applied out of band from `sql/schema.sql`; the service
//! only verifies that its tables exist.

use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Tables every repository relies on
pub const EXPECTED_TABLES: [&str; 3] = ["daily_calories", "weekly_goals", "user_fasting_presets"];

/// Pool sizing and connection lifetimes
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(10 * 60),
            max_lifetime: Duration::from_secs(30 * 60),
        }
    }
}

impl PoolSettings {
    pub fn with_max_connections(max_connections: u32) -> Self {
        Self {
            max_connections,
            min_connections: max_connections.min(2),
            ..Self::default()
        }
    }
}

/// Create a pool with default settings and the given size cap
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    connect(database_url, &PoolSettings::with_max_connections(max_connections)).await
}

pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(database_url)?.application_name("calorie-tracker");

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .max_lifetime(settings.max_lifetime)
        .test_before_acquire(true)
        .connect_with(options)
        .await?;

    info!(
        max = settings.max_connections,
        min = settings.min_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// Round-trip a trivial query
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}

/// Expected tables not present in the connected database
pub async fn missing_tables(pool: &PgPool) -> Result<Vec<String>> {
    let expected: Vec<String> = EXPECTED_TABLES.iter().map(|t| t.to_string()).collect();

    let missing = sqlx::query_scalar::<_, String>(
        "SELECT name FROM unnest($1::text[]) AS name WHERE to_regclass(name) IS NULL",
    )
    .bind(expected)
    .fetch_all(pool)
    .await?;

    Ok(missing)
}
