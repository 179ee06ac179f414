// 缓存模块
// 包含缓存键生成和缓存操作逻辑

pub mod keys;
pub mod operations;

// 重新导出常用类型和函数，方便其他模块使用
pub use operations::home::HomeCacheOperations;
