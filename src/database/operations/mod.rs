// 存储实现

pub mod memory;
pub mod postgres;
