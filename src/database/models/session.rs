use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 用户会话数据库实体，按 (agent, ip) 识别客户端
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSession {
    pub id: i64,
    pub user_id: i64,
    pub agent: String,
    pub ip: String,
    /// 最后一次确认登录的时间
    #[sqlx(rename = "last_seen")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i64,
    pub agent: String,
    pub ip: String,
    pub timestamp: DateTime<Utc>,
}

impl NewSession {
    pub fn into_session(self, id: i64) -> UserSession {
        UserSession {
            id,
            user_id: self.user_id,
            agent: self.agent,
            ip: self.ip,
            timestamp: self.timestamp,
        }
    }
}
