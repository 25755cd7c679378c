// 登录与会话管理

pub mod clock;
pub mod provision;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use provision::provision_admin;
pub use session::SessionManager;
