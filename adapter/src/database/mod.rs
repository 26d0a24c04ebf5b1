use std::{future::Future, time::Duration};

use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

pub mod model;

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(3);

fn make_pg_connect_options(cfg: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.username)
        .password(&cfg.password)
        .database(&cfg.database)
}

/// Shared handle to the PostgreSQL pool. Every store call made through it is
/// bounded by `query_timeout`.
#[derive(Clone)]
pub struct ConnectionPool {
    pool: PgPool,
    query_timeout: Duration,
}

impl ConnectionPool {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn inner_ref(&self) -> &PgPool {
        &self.pool
    }

    /// Awaits `fut` under the query deadline, leaving the database error for
    /// the caller to classify.
    pub async fn deadline<T, F>(&self, fut: F) -> AppResult<Result<T, sqlx::Error>>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        Ok(tokio::time::timeout(self.query_timeout, fut).await?)
    }

    /// Awaits `fut` under the query deadline.
    pub async fn run<T, F>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        self.deadline(fut)
            .await?
            .map_err(AppError::SpecificOperationError)
    }

    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::SpecificOperationError(e.into()))
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> ConnectionPool {
    let pool = PgPoolOptions::new()
        .acquire_timeout(cfg.query_timeout)
        .connect_lazy_with(make_pg_connect_options(cfg));
    ConnectionPool {
        pool,
        query_timeout: cfg.query_timeout,
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with_deadline(query_timeout: Duration) -> ConnectionPool {
        ConnectionPool {
            pool: PgPoolOptions::new().connect_lazy_with(PgConnectOptions::new()),
            query_timeout,
        }
    }

    #[tokio::test]
    async fn slow_store_call_fails_with_store_timeout() {
        let db = pool_with_deadline(Duration::from_millis(10));
        let res = db
            .run(std::future::pending::<Result<(), sqlx::Error>>())
            .await;
        assert!(matches!(res, Err(AppError::StoreTimeout(_))));
    }

    #[tokio::test]
    async fn store_errors_within_the_deadline_are_classified() {
        let db = pool_with_deadline(Duration::from_secs(1));
        let res = db
            .run(async { Err::<(), _>(sqlx::Error::RowNotFound) })
            .await;
        assert!(matches!(
            res,
            Err(AppError::SpecificOperationError(sqlx::Error::RowNotFound))
        ));
    }
}
