// 页面组件：表格与图表卡片

pub mod chart;
pub mod table;

pub use chart::{AreaChart, Chart, PieChart};
pub use table::{Cell, Table, TableColumn, TableError, TableList};
