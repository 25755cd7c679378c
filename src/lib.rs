use std::sync::Arc;

use auth::SessionManager;
use config::Config;
use database::Store;
use middleware::LoginLimiter;

pub mod auth;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;
pub mod view;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub sessions: Arc<SessionManager>,
    /// 未配置 Redis 时不限制登录尝试
    pub limiter: Option<Arc<LoginLimiter>>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn Store>, limiter: Option<LoginLimiter>) -> Self {
        let sessions = Arc::new(SessionManager::new(store.clone(), config.session_cooldown()));
        Self {
            config,
            store,
            sessions,
            limiter: limiter.map(Arc::new),
        }
    }

    /// 使用外部构建的会话管理器，测试中用来注入时钟
    pub fn with_sessions(
        config: Config,
        store: Arc<dyn Store>,
        sessions: SessionManager,
        limiter: Option<LoginLimiter>,
    ) -> Self {
        Self {
            config,
            store,
            sessions: Arc::new(sessions),
            limiter: limiter.map(Arc::new),
        }
    }
}
