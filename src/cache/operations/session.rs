use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::cache::models::session::{CachedSession, SessionKey};
use crate::database::{User, UserSession};

/// 进程内会话缓存
///
/// 条目读写走 `RwLock`；同一个键上的“先读后写”流程由 [`SessionCache::lock`]
/// 返回的键锁串行化，不同键之间互不阻塞。
#[derive(Default)]
pub struct SessionCache {
    entries: RwLock<HashMap<SessionKey, CachedSession>>,
    locks: Mutex<HashMap<SessionKey, Arc<AsyncMutex<()>>>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SessionKey) -> Option<CachedSession> {
        self.entries.read().get(key).cloned()
    }

    pub fn session(&self, key: &SessionKey) -> Option<UserSession> {
        self.entries.read().get(key).map(|e| e.session.clone())
    }

    pub fn user(&self, key: &SessionKey) -> Option<User> {
        self.entries.read().get(key).map(|e| e.user.clone())
    }

    /// 写入或替换缓存条目
    pub fn insert(&self, key: SessionKey, session: UserSession, user: User) {
        self.entries
            .write()
            .insert(key, CachedSession { session, user });
    }

    pub fn remove(&self, key: &SessionKey) -> Option<CachedSession> {
        self.entries.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// 获取键锁，守卫释放前同一键上的其他操作会等待
    pub async fn lock(&self, key: &SessionKey) -> KeyGuard<'_> {
        let mutex = self
            .locks
            .lock()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone();

        let guard = mutex.lock_owned().await;
        KeyGuard {
            cache: self,
            key: key.clone(),
            guard: Some(guard),
        }
    }

    /// 当前登记的键锁数量
    pub fn lock_count(&self) -> usize {
        self.locks.lock().len()
    }

    fn release(&self, key: &SessionKey) {
        let mut locks = self.locks.lock();
        // 只剩锁表自己持有时才移除，有等待者时保留
        if locks.get(key).is_some_and(|m| Arc::strong_count(m) == 1) {
            locks.remove(key);
        }
    }
}

/// 键锁守卫，释放时清理不再使用的锁
pub struct KeyGuard<'a> {
    cache: &'a SessionCache,
    key: SessionKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        self.cache.release(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;

    fn entry(id: i64) -> (UserSession, User) {
        (
            UserSession {
                id,
                user_id: 1,
                agent: "agent".into(),
                ip: "127.0.0.1".into(),
                timestamp: Utc::now(),
            },
            User {
                id: 1,
                email: "a@x.com".into(),
                firstname: "Ann".into(),
                lastname: "Lee".into(),
                password_hash: String::new(),
            },
        )
    }

    #[test]
    fn insert_replaces_and_remove_evicts() {
        let cache = SessionCache::new();
        let key = SessionKey::new("agent", "127.0.0.1");

        let (session, user) = entry(1);
        cache.insert(key.clone(), session, user);
        let (session, user) = entry(2);
        cache.insert(key.clone(), session, user);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.session(&key).map(|s| s.id), Some(2));
        assert_eq!(cache.user(&key).map(|u| u.email), Some("a@x.com".into()));

        assert!(cache.remove(&key).is_some());
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn keys_do_not_collide_on_concatenation() {
        let cache = SessionCache::new();
        let (session, user) = entry(1);
        cache.insert(SessionKey::new("ab", "c"), session, user);

        assert!(cache.get(&SessionKey::new("a", "bc")).is_none());
    }

    #[tokio::test]
    async fn lock_is_released_and_pruned() {
        let cache = SessionCache::new();
        let key = SessionKey::new("agent", "127.0.0.1");

        {
            let _guard = cache.lock(&key).await;
            assert_eq!(cache.lock_count(), 1);
        }
        assert_eq!(cache.lock_count(), 0);
    }

    #[tokio::test]
    async fn same_key_operations_are_serialized() {
        let cache = Arc::new(SessionCache::new());
        let key = SessionKey::new("agent", "127.0.0.1");

        let guard = cache.lock(&key).await;

        let waiter = {
            let cache = cache.clone();
            let key = key.clone();
            tokio::spawn(async move {
                let _guard = cache.lock(&key).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());
        // 有等待者时锁不会被清理
        assert_eq!(cache.lock_count(), 1);

        drop(guard);
        waiter.await.unwrap();
        assert_eq!(cache.lock_count(), 0);
    }
}
