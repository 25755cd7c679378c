/// 缓存键模块
/// 提供 Redis 缓存键生成函数

/// 登录尝试计数键前缀
const LOGIN_ATTEMPTS_PREFIX: &str = "login:attempts:";

/// 生成某个客户端 IP 的登录尝试计数键
pub fn login_attempts_key(ip: &str) -> String {
    format!("{}{}", LOGIN_ATTEMPTS_PREFIX, ip)
}
