use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::auth::clock::{Clock, SystemClock};
use crate::cache::{SessionCache, SessionKey};
use crate::database::{NewSession, Store, User, UserSession};
use crate::error::{SessionError, StorageError};
use crate::utils::{verify_dummy_password, verify_password};

/// 登录状态管理
///
/// 两级结构：进程内缓存在冷却期内直接信任，过期或未命中时回到持久化存储
/// 查找 (agent, ip) 对应的会话并刷新时间戳。同一个客户端键上的操作通过缓存
/// 的键锁串行执行。
pub struct SessionManager {
    store: Arc<dyn Store>,
    cache: SessionCache,
    cooldown_mins: i64,
    clock: Arc<dyn Clock>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn Store>, cooldown: chrono::Duration) -> Self {
        Self::with_clock(store, cooldown, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn Store>,
        cooldown: chrono::Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            cache: SessionCache::new(),
            cooldown_mins: cooldown.num_minutes(),
            clock,
        }
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    /// 缓存会话的年龄按整分钟截断，严格小于冷却期才算新鲜
    fn is_fresh(&self, session: &UserSession, now: DateTime<Utc>) -> bool {
        let age_mins = (now - session.timestamp).num_minutes().abs();
        age_mins < self.cooldown_mins
    }

    /// 检查客户端是否已登录
    pub async fn is_logged_in(&self, key: &SessionKey) -> Result<bool, StorageError> {
        let _guard = self.cache.lock(key).await;
        let now = self.clock.now();

        let cached = self.cache.get(key);
        if let Some(entry) = &cached {
            if self.is_fresh(&entry.session, now) {
                return Ok(true);
            }
            tracing::debug!("Cached session for {} is stale, checking store", key);
        }

        let Some(mut session) = self.store.find_session(&key.agent, &key.ip).await? else {
            if cached.is_some() {
                self.cache.remove(key);
                tracing::info!("Session for {} no longer exists, evicted", key);
            }
            return Ok(false);
        };

        let user = match cached {
            Some(entry) if entry.user.id == session.user_id => entry.user,
            _ => match self.store.get_user(session.user_id).await? {
                Some(user) => user,
                None => {
                    tracing::warn!(
                        "Session {} references missing user {}",
                        session.id,
                        session.user_id
                    );
                    self.cache.remove(key);
                    return Ok(false);
                }
            },
        };

        session.timestamp = now;
        match self.store.update_session(&session).await {
            Ok(()) => {}
            Err(StorageError::NotFound { .. }) => {
                tracing::info!("Session {} for {} was removed concurrently", session.id, key);
                self.cache.remove(key);
                return Ok(false);
            }
            Err(e) => return Err(e),
        }
        self.cache.insert(key.clone(), session, user);

        Ok(true)
    }

    /// 校验邮箱和密码，成功则创建新会话
    pub async fn login(
        &self,
        key: &SessionKey,
        email: &str,
        password: &str,
    ) -> Result<bool, StorageError> {
        let _guard = self.cache.lock(key).await;

        let candidates: Vec<User> = self
            .store
            .list_users()
            .await?
            .into_iter()
            .filter(|u| u.email == email)
            .collect();

        let Some(user) = check_credentials(candidates, password).await else {
            tracing::info!("Login failed for {} from {}", email, key);
            return Ok(false);
        };

        if let Some(previous) = self.store.find_session(&key.agent, &key.ip).await? {
            tracing::debug!("Replacing session {} for {}", previous.id, key);
            self.store.delete_session(previous.id).await?;
        }
        // 旧行已删除，缓存不能比持久化会话活得更久
        self.cache.remove(key);

        let session = NewSession {
            user_id: user.id,
            agent: key.agent.clone(),
            ip: key.ip.clone(),
            timestamp: self.clock.now(),
        };
        let id = self.store.insert_session(session.clone()).await?;

        tracing::info!("User {} logged in from {}", user.email, key);
        self.cache
            .insert(key.clone(), session.into_session(id), user);

        Ok(true)
    }

    /// 注销客户端会话，没有会话时返回 `NotLoggedIn`
    pub async fn logout(&self, key: &SessionKey) -> Result<(), SessionError> {
        let _guard = self.cache.lock(key).await;

        let session = match self.cache.session(key) {
            Some(session) => Some(session),
            None => self.store.find_session(&key.agent, &key.ip).await?,
        };
        let Some(session) = session else {
            return Err(SessionError::NotLoggedIn);
        };

        match self.store.delete_session(session.id).await {
            Ok(()) => {}
            Err(StorageError::NotFound { .. }) => {
                tracing::debug!("Session {} was already removed", session.id);
            }
            Err(e) => return Err(e.into()),
        }
        self.cache.remove(key);

        tracing::info!("Session {} for {} logged out", session.id, key);
        Ok(())
    }

    /// 当前进程内已确认登录的用户
    pub fn get_user(&self, key: &SessionKey) -> Option<User> {
        self.cache.user(key)
    }
}

/// bcrypt 校验在阻塞线程池上执行
async fn check_credentials(candidates: Vec<User>, password: &str) -> Option<User> {
    let password = password.to_string();
    let result = tokio::task::spawn_blocking(move || {
        if candidates.is_empty() {
            verify_dummy_password(&password);
            return None;
        }
        candidates
            .into_iter()
            .find(|u| verify_password(&password, &u.password_hash))
    })
    .await;

    match result {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Password verification task failed: {}", e);
            None
        }
    }
}
