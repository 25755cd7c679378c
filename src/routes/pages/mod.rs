mod handler;
mod model;

pub use handler::{charts, index, tables};
pub use model::{axis_max, sessions_per_day, sessions_per_user};
