//! Derived analytics
//!
//! Pure reducers over in-memory order, table, inventory and staff
//! collections. Nothing is cached; callers pass whatever snapshot they last
//! fetched and get numbers derived from it alone.

mod dashboard;
pub mod money;
mod reducers;
mod sales_mix;
mod time_range;

pub use dashboard::{DashboardInput, DashboardMetrics};
pub use reducers::{
    active_table_count, average_order_value, inventory_alert_count, kitchen_queue_depth,
    percent_change, revenue_total, staff_on_duty,
};
pub use sales_mix::{CategorySales, SalesReport, category_sales_mix, sales_report};
pub use time_range::{TimeRange, Window, day_start_millis, local_date};
