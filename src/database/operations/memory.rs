// 进程内存储实现，用于测试和嵌入场景

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::database::{NewSession, NewUser, Store, User, UserSession};
use crate::error::{EntityKind, StorageError};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    sessions: Vec<UserSession>,
    next_user_id: i64,
    next_session_id: i64,
}

/// 内存存储，行按插入顺序保存，id 自增
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.tables.lock().users.clone())
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        Ok(self.tables.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<i64, StorageError> {
        let mut tables = self.tables.lock();
        tables.next_user_id += 1;
        let id = tables.next_user_id;
        tables.users.push(user.into_user(id));
        Ok(id)
    }

    async fn list_sessions(&self) -> Result<Vec<UserSession>, StorageError> {
        Ok(self.tables.lock().sessions.clone())
    }

    async fn find_session(
        &self,
        agent: &str,
        ip: &str,
    ) -> Result<Option<UserSession>, StorageError> {
        Ok(self
            .tables
            .lock()
            .sessions
            .iter()
            .find(|s| s.agent == agent && s.ip == ip)
            .cloned())
    }

    async fn insert_session(&self, session: NewSession) -> Result<i64, StorageError> {
        let mut tables = self.tables.lock();
        tables.next_session_id += 1;
        let id = tables.next_session_id;
        tables.sessions.push(session.into_session(id));
        Ok(id)
    }

    async fn update_session(&self, session: &UserSession) -> Result<(), StorageError> {
        let mut tables = self.tables.lock();
        match tables.sessions.iter_mut().find(|s| s.id == session.id) {
            Some(row) => {
                *row = session.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound {
                kind: EntityKind::Session,
                id: session.id,
            }),
        }
    }

    async fn delete_session(&self, id: i64) -> Result<(), StorageError> {
        let mut tables = self.tables.lock();
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.id != id);
        if tables.sessions.len() == before {
            return Err(StorageError::NotFound {
                kind: EntityKind::Session,
                id,
            });
        }
        Ok(())
    }
}
