/// 缓存操作
/// 提供缓存操作的功能实现

// 首页聚合数据缓存操作
pub mod home;

// 重新导出常用操作
pub use home::HomeCacheOperations;
