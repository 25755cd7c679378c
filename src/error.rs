use std::fmt;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::view::{components::table::TableError, escape};

/// 持久化实体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Session,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => f.write_str("user"),
            EntityKind::Session => f.write_str("session"),
        }
    }
}

/// 存储层错误，区分“不存在”和“存储不可用”
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },
}

/// 会话操作错误
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no session for this client")]
    NotLoggedIn,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("存储服务不可用")]
    Storage(#[from] StorageError),
    #[error("登录尝试过于频繁，请在{0}秒后重试")]
    TooManyAttempts(u64),
    #[error("表格渲染失败: {0}")]
    Table(#[from] TableError),
    #[error("内部服务器错误")]
    InternalServerError,
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Storage(e) => AppError::Storage(e),
            SessionError::NotLoggedIn => AppError::InternalServerError,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::TooManyAttempts(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Storage(_) | AppError::Table(_) | AppError::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Storage(e) = &self {
            tracing::error!("Storage failure: {}", e);
        }

        let body = format!(
            "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>{code}</title></head>\
             <body><div class=\"error-page\"><h1>{code}</h1><p>{message}</p>\
             <a href=\"/Index\">Back</a></div></body></html>",
            code = status.as_u16(),
            message = escape(&self.to_string()),
        );

        (status, Html(body)).into_response()
    }
}
