use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::core::config::DatabaseConfig;

const CREATE_DAMAGE_REPORTS: &str = r#"
CREATE TABLE IF NOT EXISTS damage_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    windmill_number TEXT,
    damage TEXT,
    location TEXT,
    image_path TEXT,
    type TEXT DEFAULT 'windmill',
    timestamp DATETIME DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)
"#;

const CREATE_SOLAR_PANEL_REPORTS: &str = r#"
CREATE TABLE IF NOT EXISTS solar_panel_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    panel_id TEXT,
    damage TEXT,
    location TEXT,
    image_path TEXT,
    timestamp DATETIME DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)
"#;

pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
}

/// Create both report tables if they are missing. Safe to call repeatedly.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_DAMAGE_REPORTS)
        .execute(pool)
        .await
        .inspect_err(|e| tracing::error!("Windmill table setup failed: {:?}", e))?;

    sqlx::query(CREATE_SOLAR_PANEL_REPORTS)
        .execute(pool)
        .await
        .inspect_err(|e| tracing::error!("Solar panel table setup failed: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_names(pool: &SqlitePool) -> Vec<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_ensure_schema_creates_both_tables() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        ensure_schema(&pool).await.unwrap();

        assert_eq!(
            table_names(&pool).await,
            vec!["damage_reports".to_string(), "solar_panel_reports".to_string()]
        );
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        ensure_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO solar_panel_reports (panel_id, damage, location, image_path) VALUES ('SP-1', 'Yes', 'Roof', 'uploads/a.jpg')")
            .execute(&pool)
            .await
            .unwrap();

        ensure_schema(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM solar_panel_reports")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
