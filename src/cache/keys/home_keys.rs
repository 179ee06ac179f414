/// 首页聚合数据的缓存键
const HOME_DATA_KEY: &str = "home_data";

/// 首页缓存过期时间（秒）
pub const HOME_CACHE_TTL_SECS: u64 = 3600;

/// 生成首页聚合数据缓存键
pub fn home_data_key() -> String {
    HOME_DATA_KEY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_key_is_stable() {
        assert_eq!(home_data_key(), "home_data");
        assert_eq!(HOME_CACHE_TTL_SECS, 3600);
    }
}
