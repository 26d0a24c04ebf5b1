use std::{future::Future, time::Duration};

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisResult};
use shared::{config::RedisConfig, error::AppResult};

pub mod model;

use model::{RedisKey, RedisValue};

/// Token store client. Holds one reconnecting connection shared by all
/// requests and bounds every command by `timeout`.
pub struct RedisClient {
    conn: ConnectionManager,
    timeout: Duration,
}

impl RedisClient {
    pub async fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(format!("redis://{}:{}", config.host, config.port))?;
        let conn = bounded(config.timeout, ConnectionManager::new(client)).await?;
        Ok(Self {
            conn,
            timeout: config.timeout,
        })
    }

    pub async fn set_ex<T: RedisKey>(&self, key: &T, value: &T::Value, ttl: u64) -> AppResult<()> {
        let mut conn = self.conn.clone();
        bounded(
            self.timeout,
            conn.set_ex::<_, _, ()>(key.inner(), value.inner(), ttl),
        )
        .await
    }

    pub async fn get<T: RedisKey>(&self, key: &T) -> AppResult<Option<T::Value>> {
        let mut conn = self.conn.clone();
        let result: Option<String> = bounded(self.timeout, conn.get(key.inner())).await?;
        result.map(T::Value::try_from).transpose()
    }

    pub async fn delete<T: RedisKey>(&self, key: &T) -> AppResult<()> {
        let mut conn = self.conn.clone();
        bounded(self.timeout, conn.del::<_, ()>(key.inner())).await
    }
}

async fn bounded<T, F>(timeout: Duration, fut: F) -> AppResult<T>
where
    F: Future<Output = RedisResult<T>>,
{
    Ok(tokio::time::timeout(timeout, fut).await??)
}

#[cfg(test)]
mod tests {
    use shared::error::AppError;

    use super::*;

    #[tokio::test]
    async fn stalled_command_fails_with_store_timeout() {
        let res = bounded(
            Duration::from_millis(10),
            std::future::pending::<RedisResult<()>>(),
        )
        .await;
        assert!(matches!(res, Err(AppError::StoreTimeout(_))));
    }

    #[tokio::test]
    async fn command_errors_pass_through() {
        let failing = async {
            Err::<(), _>(redis::RedisError::from((
                redis::ErrorKind::ResponseError,
                "boom",
            )))
        };
        let res = bounded(Duration::from_secs(1), failing).await;
        assert!(matches!(res, Err(AppError::KeyValueStoreError(_))));
    }
}
