#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use dashboard::auth::Clock;
use dashboard::database::{MemoryStore, NewSession, NewUser, Store, User, UserSession};
use dashboard::error::{EntityKind, StorageError};
use parking_lot::Mutex;

/// 可手动拨动的时钟
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self(Mutex::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        )))
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock()
    }
}

/// 注入的存储故障
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// 所有调用返回数据库错误
    Unavailable,
    /// 只有新建会话失败
    InsertSession,
    /// 刷新会话时行已不存在
    UpdateNotFound,
}

/// 记录读写次数的存储包装，可注入故障
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fault: Mutex<Option<Fault>>,
}

fn unavailable() -> StorageError {
    StorageError::Database(sqlx::Error::PoolTimedOut)
}

impl CountingStore {
    pub fn set_fault(&self, fault: Option<Fault>) {
        *self.fault.lock() = fault;
    }

    fn check(&self) -> Result<(), StorageError> {
        match *self.fault.lock() {
            Some(Fault::Unavailable) => Err(unavailable()),
            _ => Ok(()),
        }
    }

    fn has_fault(&self, fault: Fault) -> bool {
        *self.fault.lock() == Some(fault)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for CountingStore {
    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        self.read();
        self.check()?;
        self.inner.list_users().await
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        self.read();
        self.check()?;
        self.inner.get_user(id).await
    }

    async fn insert_user(&self, user: NewUser) -> Result<i64, StorageError> {
        self.write();
        self.check()?;
        self.inner.insert_user(user).await
    }

    async fn list_sessions(&self) -> Result<Vec<UserSession>, StorageError> {
        self.read();
        self.check()?;
        self.inner.list_sessions().await
    }

    async fn find_session(
        &self,
        agent: &str,
        ip: &str,
    ) -> Result<Option<UserSession>, StorageError> {
        self.read();
        self.check()?;
        self.inner.find_session(agent, ip).await
    }

    async fn insert_session(&self, session: NewSession) -> Result<i64, StorageError> {
        self.write();
        self.check()?;
        if self.has_fault(Fault::InsertSession) {
            return Err(unavailable());
        }
        self.inner.insert_session(session).await
    }

    async fn update_session(&self, session: &UserSession) -> Result<(), StorageError> {
        self.write();
        self.check()?;
        if self.has_fault(Fault::UpdateNotFound) {
            return Err(StorageError::NotFound {
                kind: EntityKind::Session,
                id: session.id,
            });
        }
        self.inner.update_session(session).await
    }

    async fn delete_session(&self, id: i64) -> Result<(), StorageError> {
        self.write();
        self.check()?;
        self.inner.delete_session(id).await
    }
}

/// 测试用户，bcrypt 成本取最低值
pub async fn add_user(store: &dyn Store, email: &str, password: &str, first: &str, last: &str) -> i64 {
    store
        .insert_user(NewUser {
            email: email.into(),
            firstname: first.into(),
            lastname: last.into(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
        })
        .await
        .unwrap()
}
