use std::fmt;

use crate::database::{User, UserSession};

/// 会话缓存键，由客户端 user-agent 和 IP 组成
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub agent: String,
    pub ip: String,
}

impl SessionKey {
    pub fn new(agent: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            ip: ip.into(),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.agent, self.ip)
    }
}

/// 会话缓存数据模型，会话和所属用户一起缓存
#[derive(Debug, Clone)]
pub struct CachedSession {
    pub session: UserSession,
    pub user: User,
}
