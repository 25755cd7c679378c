use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    /// 缓存会话免复查的分钟数
    pub session_cooldown_mins: i64,
    pub login_rate_limit_window_secs: u64,
    pub login_rate_limit_attempts: u32,
    pub page_title: String,
    pub static_dir: String,
    pub admin: Option<AdminAccount>,
}

/// 启动时自动创建的管理员账号
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AdminAccount {
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminAccount {
                email,
                password,
                firstname: env::var("ADMIN_FIRSTNAME").unwrap_or_else(|_| "Admin".into()),
                lastname: env::var("ADMIN_LASTNAME").unwrap_or_default(),
            }),
            _ => None,
        };

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            redis_url: env::var("REDIS_URL").ok(),
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            session_cooldown_mins: env::var("SESSION_COOLDOWN")
                .ok()
                .and_then(|v| v.trim_end_matches('m').parse().ok())
                .unwrap_or(15),
            login_rate_limit_window_secs: env::var("LOGIN_RATE_LIMIT_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            login_rate_limit_attempts: env::var("LOGIN_RATE_LIMIT_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            page_title: env::var("PAGE_TITLE").unwrap_or_else(|_| "Dashboard".into()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()),
            admin,
        })
    }

    pub fn session_cooldown(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_cooldown_mins)
    }

    pub fn login_rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.login_rate_limit_window_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: String::new(),
            redis_url: None,
            server_host: "127.0.0.1".into(),
            server_port: 3000,
            session_cooldown_mins: 15,
            login_rate_limit_window_secs: 300,
            login_rate_limit_attempts: 10,
            page_title: "Dashboard".into(),
            static_dir: "static".into(),
            admin: None,
        }
    }
}
