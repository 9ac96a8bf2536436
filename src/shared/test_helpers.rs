#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use sqlx::SqlitePool;
#[cfg(test)]
use tempfile::TempDir;

#[cfg(test)]
use crate::core::config::{Config, DatabaseConfig};
#[cfg(test)]
use crate::core::database;

/// Fresh in-memory store with both report tables
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = database::create_pool(&DatabaseConfig::in_memory())
        .await
        .unwrap();
    database::ensure_schema(&pool).await.unwrap();
    pool
}

/// Full application router over an in-memory store and a temporary upload directory
#[cfg(test)]
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub upload_dir: TempDir,
}

#[cfg(test)]
impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Same as `spawn`, with a hook to adjust the configuration first
    pub async fn spawn_with(configure: impl FnOnce(&mut Config)) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let mut config = Config::for_tests(upload_dir.path());
        configure(&mut config);
        let pool = test_pool().await;

        let router = crate::build_router(&config, pool.clone());
        let server = TestServer::new(router).unwrap();

        Self {
            server,
            pool,
            upload_dir,
        }
    }

    /// Number of files currently in the upload directory
    pub fn stored_upload_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
