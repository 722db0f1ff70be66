//! The todo store gateway.

use sqlx::SqlitePool;
use tracing::info;

use crate::db::{self, DatabaseConfig};
use crate::repositories::TodoSession;

/// Owns the connection pool and hands out request-scoped sessions.
///
/// Constructed once at startup and shared through application state; cloning
/// only clones the pool handle.
#[derive(Clone)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    /// Opens the pool and makes sure the schema exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = db::create_pool(config).await?;
        db::init_schema(&pool).await?;
        info!(in_memory = config.is_in_memory(), "Todo store connected");
        Ok(Self { pool })
    }

    /// Starts a new session on a pooled connection.
    ///
    /// For sessions that only read, or whose first statement is a write.
    pub async fn begin(&self) -> Result<TodoSession, sqlx::Error> {
        let tx = self.pool.begin().await?;
        Ok(TodoSession::new(tx))
    }

    /// Starts a session that holds the database write lock from the start.
    ///
    /// Use this when the session reads before it writes. A deferred SQLite
    /// transaction that reads first cannot upgrade to a writer once another
    /// connection has committed, and fails with `SQLITE_BUSY` without waiting
    /// on the busy timeout. Taking the lock up front makes concurrent writers
    /// queue on the busy timeout instead.
    pub async fn begin_write(&self) -> Result<TodoSession, sqlx::Error> {
        let mut session = self.begin().await?;
        session.lock().await?;
        Ok(session)
    }

    /// Round-trips a trivial query.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every connection. Pending sessions finish first.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Todo store closed");
    }
}
