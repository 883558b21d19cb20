//! Pooled Redis client, shaped after the `PgClient`/`PgConfig` split used
//! for the relational store in the teacher's stack.

use std::sync::Arc;
use std::time::Duration;

use deadpool_redis::{Config as PoolConfig, Pool, Runtime};
use redis::AsyncCommands;

use crate::error::{KvError, KvResult};

/// Minimum allowed pool size; below this a burst of concurrent requests
/// would starve immediately.
pub const MIN_POOL_SIZE: usize = 1;
/// Maximum allowed pool size; this is a single-Redis-instance adapter, not
/// a sharded client, so an unbounded pool just trades memory for nothing.
pub const MAX_POOL_SIZE: usize = 64;

/// Configuration for the KV store adapter, sourced from the environment.
#[derive(Debug, Clone, clap::Parser)]
pub struct KvConfig {
    /// Redis connection string, e.g. `redis://127.0.0.1:6379/0`.
    #[clap(long, env = "REDIS_URL")]
    pub redis_url: String,

    /// Maximum number of pooled connections.
    #[clap(long, env = "REDIS_POOL_MAX_SIZE", default_value_t = 16)]
    pub pool_max_size: usize,

    /// Timeout, in milliseconds, waiting for a pooled connection.
    #[clap(long, env = "REDIS_CONNECTION_TIMEOUT_MS", default_value_t = 2_000)]
    pub connection_timeout_ms: u64,

    /// Seconds each key lives without being touched.
    #[clap(long, env = "PERSISTENCE_TTL_SECONDS", default_value_t = 3_600)]
    pub ttl_seconds: u64,
}

impl KvConfig {
    pub fn validate(&self) -> KvResult<()> {
        if self.redis_url.is_empty() {
            return Err(KvError::config("REDIS_URL must not be empty"));
        }
        if !(MIN_POOL_SIZE..=MAX_POOL_SIZE).contains(&self.pool_max_size) {
            return Err(KvError::config(format!(
                "REDIS_POOL_MAX_SIZE must be between {MIN_POOL_SIZE} and {MAX_POOL_SIZE}"
            )));
        }
        Ok(())
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

struct KvClientInner {
    pool: Pool,
    config: KvConfig,
}

/// Pooled, cloneable handle onto the Redis-backed KV store.
#[derive(Clone)]
pub struct KvClient {
    inner: Arc<KvClientInner>,
}

impl KvClient {
    #[tracing::instrument(skip_all, target = "factcheck_kv::client", fields(pool_max_size = config.pool_max_size))]
    pub fn new(config: KvConfig) -> KvResult<Self> {
        config.validate()?;

        let pool_config = PoolConfig::from_url(&config.redis_url);
        let pool = pool_config
            .builder()
            .map_err(|e| KvError::config(e.to_string()))?
            .max_size(config.pool_max_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| KvError::config(e.to_string()))?;

        tracing::info!(
            target: crate::TRACING_TARGET_CLIENT,
            pool_max_size = config.pool_max_size,
            "connected to redis"
        );

        Ok(Self {
            inner: Arc::new(KvClientInner { pool, config }),
        })
    }

    pub fn ttl(&self) -> Duration {
        self.inner.config.ttl()
    }

    async fn connection(&self) -> KvResult<deadpool_redis::Connection> {
        tokio::time::timeout(self.inner.config.connection_timeout(), self.inner.pool.get())
            .await
            .map_err(|_| KvError::Timeout)?
            .map_err(KvError::Connection)
    }

    /// `HSET` every field in `fields`, then refresh the key's TTL in the
    /// same round trip.
    pub async fn hset_many(&self, key: &str, fields: &[(&str, String)]) -> KvResult<()> {
        let mut conn = self.connection().await?;
        let ttl = self.ttl().as_secs() as i64;
        let mut pipe = redis::pipe();
        pipe.hset_multiple(key, fields).ignore();
        pipe.expire(key, ttl).ignore();
        pipe.query_async::<()>(&mut conn).await?;
        Ok(())
    }

    pub async fn hgetall(&self, key: &str) -> KvResult<std::collections::HashMap<String, String>> {
        let mut conn = self.connection().await?;
        Ok(conn.hgetall(key).await?)
    }

    pub async fn expire(&self, key: &str) -> KvResult<()> {
        let mut conn = self.connection().await?;
        let ttl = self.ttl().as_secs() as i64;
        let _: () = conn.expire(key, ttl).await?;
        Ok(())
    }

    pub async fn del(&self, key: &str) -> KvResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }

    /// `RPUSH` a value onto a list key, then refresh its TTL.
    pub async fn rpush(&self, key: &str, value: String) -> KvResult<()> {
        let mut conn = self.connection().await?;
        let ttl = self.ttl().as_secs() as i64;
        let mut pipe = redis::pipe();
        pipe.rpush(key, value).ignore();
        pipe.expire(key, ttl).ignore();
        pipe.query_async::<()>(&mut conn).await?;
        Ok(())
    }

    pub async fn lrange_all(&self, key: &str) -> KvResult<Vec<String>> {
        let mut conn = self.connection().await?;
        Ok(conn.lrange(key, 0, -1).await?)
    }

    pub async fn set_bytes(&self, key: &str, value: Vec<u8>) -> KvResult<()> {
        let mut conn = self.connection().await?;
        let ttl = self.ttl().as_secs() as i64;
        let mut pipe = redis::pipe();
        pipe.set(key, value).ignore();
        pipe.expire(key, ttl).ignore();
        pipe.query_async::<()>(&mut conn).await?;
        Ok(())
    }

    pub async fn get_bytes(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        Ok(conn.get(key).await?)
    }
}
