// 数据库模块
// 包含实体定义、存储接口和具体实现

pub mod models;
pub mod operations;

use async_trait::async_trait;

use crate::error::StorageError;

pub use models::session::{NewSession, UserSession};
pub use models::user::{NewUser, User};
pub use operations::memory::MemoryStore;
pub use operations::postgres::PgStore;

/// 持久化存储接口
///
/// 所有失败都以 `StorageError` 返回，调用方据此区分“没有记录”和“存储不可用”。
#[async_trait]
pub trait Store: Send + Sync {
    /// 按 id 顺序列出全部用户
    async fn list_users(&self) -> Result<Vec<User>, StorageError>;

    async fn get_user(&self, id: i64) -> Result<Option<User>, StorageError>;

    async fn insert_user(&self, user: NewUser) -> Result<i64, StorageError>;

    /// 按 id 顺序列出全部会话
    async fn list_sessions(&self) -> Result<Vec<UserSession>, StorageError>;

    /// 查找与 (agent, ip) 完全匹配的第一条会话
    async fn find_session(&self, agent: &str, ip: &str)
    -> Result<Option<UserSession>, StorageError>;

    async fn insert_session(&self, session: NewSession) -> Result<i64, StorageError>;

    async fn update_session(&self, session: &UserSession) -> Result<(), StorageError>;

    async fn delete_session(&self, id: i64) -> Result<(), StorageError>;
}
