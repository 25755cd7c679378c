use std::sync::OnceLock;

use bcrypt::{DEFAULT_COST, hash, verify};

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), DEFAULT_COST)
}

/// 校验密码，哈希格式无效时视为不匹配
pub fn verify_password(password: &str, hash: &str) -> bool {
    match verify(password.as_bytes(), hash) {
        Ok(matched) => matched,
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}

/// 用于未知邮箱的占位校验，使两种失败耗时相近
pub fn verify_dummy_password(password: &str) {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let dummy = DUMMY_HASH.get_or_init(|| hash_password("dashboard-dummy-password").ok());
    if let Some(dummy) = dummy {
        let _ = verify(password.as_bytes(), dummy);
    }
}

/// 登录后跳转的目标页面，只接受简单页面名
pub fn sanitize_return(target: Option<&str>) -> Option<String> {
    let target = target?.trim().trim_start_matches('/');
    let valid = !target.is_empty()
        && target
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then(|| target.to_string())
}
