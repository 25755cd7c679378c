// 缓存模块
// 包含会话缓存数据结构和操作逻辑

pub mod keys;
pub mod models;
pub mod operations;

pub use models::session::{CachedSession, SessionKey};
pub use operations::session::{KeyGuard, SessionCache};
