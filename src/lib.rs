pub mod adapter;
pub mod aggregate;
pub mod backend;
pub mod chart;
pub mod check;
pub mod html;
pub mod logging;
pub mod models;
pub mod page;
pub mod settings;
pub mod sidebar;

pub use adapter::{render_orders_trend, render_status_breakdown};
pub use sidebar::init_sidebar;
