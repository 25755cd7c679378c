use std::sync::Arc;

use redis::AsyncCommands;

use crate::{cache::keys::login_attempts_key, config::Config, error::AppError};

/// 按客户端 IP 限制登录尝试次数
#[derive(Clone)]
pub struct LoginLimiter {
    redis: Arc<redis::Client>,
    config: Arc<Config>,
}

impl LoginLimiter {
    pub fn new(redis: redis::Client, config: Config) -> Self {
        Self {
            redis: Arc::new(redis),
            config: Arc::new(config),
        }
    }

    /// 记录一次登录尝试，超过窗口内上限时拒绝
    pub async fn check(&self, ip: &str) -> Result<(), AppError> {
        let key = login_attempts_key(ip);
        let window = self.config.login_rate_limit_window().as_secs();

        let mut conn = self
            .redis
            .get_multiplexed_async_connection()
            .await
            .map_err(redis_failure)?;

        // 使用 Redis 的 INCR 和 EXPIRE 实现计数器
        let count: u32 = conn.incr(&key, 1).await.map_err(redis_failure)?;
        if count == 1 {
            let _: () = conn
                .expire(&key, window as i64)
                .await
                .map_err(redis_failure)?;
        }

        if count > self.config.login_rate_limit_attempts {
            tracing::warn!("Login attempts from {} exceeded limit ({})", ip, count);
            return Err(AppError::TooManyAttempts(window));
        }

        Ok(())
    }

    /// 登录成功后清空计数
    pub async fn reset(&self, ip: &str) {
        let result: redis::RedisResult<()> = async {
            let mut conn = self.redis.get_multiplexed_async_connection().await?;
            let _: () = conn.del(login_attempts_key(ip)).await?;
            Ok(())
        }
        .await;

        if let Err(e) = result {
            tracing::warn!("Failed to reset login attempts for {}: {}", ip, e);
        }
    }
}

fn redis_failure(e: redis::RedisError) -> AppError {
    tracing::error!("Redis error in login limiter: {}", e);
    AppError::InternalServerError
}
