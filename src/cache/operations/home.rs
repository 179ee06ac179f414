use std::sync::Arc;

use redis::{AsyncCommands, Client as RedisClient};

use crate::cache::keys::{HOME_CACHE_TTL_SECS, home_data_key};
use crate::routes::home::model::HomeData;

/// 首页聚合数据缓存操作
pub struct HomeCacheOperations;

impl HomeCacheOperations {
    /// 缓存首页聚合数据，过期时间固定为一小时
    pub async fn cache_home(
        redis: &Arc<RedisClient>,
        data: &HomeData,
    ) -> Result<(), redis::RedisError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let json = serde_json::to_string(data).map_err(|e| {
            redis::RedisError::from((redis::ErrorKind::IoError, "序列化错误", e.to_string()))
        })?;

        let _: () = conn.set_ex(home_data_key(), json, HOME_CACHE_TTL_SECS).await?;

        Ok(())
    }

    /// 获取缓存的首页聚合数据
    pub async fn get_home(
        redis: &Arc<RedisClient>,
    ) -> Result<Option<HomeData>, redis::RedisError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let result: Option<String> = conn.get(home_data_key()).await?;

        match result {
            Some(json) => {
                let data = serde_json::from_str(&json).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::IoError,
                        "反序列化错误",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    /// 删除首页缓存（写入新内容后使缓存失效）
    pub async fn remove_home(redis: &Arc<RedisClient>) -> Result<(), redis::RedisError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let _: () = conn.del(home_data_key()).await?;

        Ok(())
    }
}
