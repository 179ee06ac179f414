/// 缓存键模块
/// 提供各种缓存键生成函数

// 首页缓存键模块
pub mod home_keys;

// 重新导出常用的键生成函数
pub use home_keys::{HOME_CACHE_TTL_SECS, home_data_key};
