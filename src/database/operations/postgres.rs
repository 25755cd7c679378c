// Postgres 存储实现

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{NewSession, NewUser, Store, User, UserSession};
use crate::error::{EntityKind, StorageError};

/// 基于连接池的 Postgres 存储
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 执行内嵌的数据库迁移
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, firstname, lastname, password_hash
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, firstname, lastname, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<i64, StorageError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, firstname, lastname, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Created user {} ({})", id, user.email);
        Ok(id)
    }

    async fn list_sessions(&self) -> Result<Vec<UserSession>, StorageError> {
        let sessions = sqlx::query_as::<_, UserSession>(
            r#"
            SELECT id, user_id, agent, ip, last_seen
            FROM user_sessions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    async fn find_session(
        &self,
        agent: &str,
        ip: &str,
    ) -> Result<Option<UserSession>, StorageError> {
        let session = sqlx::query_as::<_, UserSession>(
            r#"
            SELECT id, user_id, agent, ip, last_seen
            FROM user_sessions
            WHERE agent = $1 AND ip = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(agent)
        .bind(ip)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn insert_session(&self, session: NewSession) -> Result<i64, StorageError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO user_sessions (user_id, agent, ip, last_seen)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(session.user_id)
        .bind(&session.agent)
        .bind(&session.ip)
        .bind(session.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_session(&self, session: &UserSession) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE user_sessions
            SET user_id = $1, agent = $2, ip = $3, last_seen = $4
            WHERE id = $5
            "#,
        )
        .bind(session.user_id)
        .bind(&session.agent)
        .bind(&session.ip)
        .bind(session.timestamp)
        .bind(session.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                kind: EntityKind::Session,
                id: session.id,
            });
        }
        Ok(())
    }

    async fn delete_session(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                kind: EntityKind::Session,
                id,
            });
        }
        Ok(())
    }
}
