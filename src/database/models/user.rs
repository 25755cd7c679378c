use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 用户数据库实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
            .trim()
            .to_string()
    }
}

/// 待插入的用户，id 由存储分配
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            email: self.email,
            firstname: self.firstname,
            lastname: self.lastname,
            password_hash: self.password_hash,
        }
    }
}
