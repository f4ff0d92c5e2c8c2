#![cfg(test)]
use std::env;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

/// Fresh, migrated database for one test.
///
/// Defaults to a private in-memory sqlite database; set `TEST_DATABASE_URL`
/// to run against a real server instead.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    common::utils::logging::init_test_logging();

    let url = env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let cfg = DatabaseConfig { url, max_connections: 5, min_connections: 1, ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// `SKIP_DB_TESTS=1` turns the database-backed tests into no-ops.
pub fn skip_db_tests() -> bool {
    env::var("SKIP_DB_TESTS").map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}
