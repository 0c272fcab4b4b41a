//! Dashboard metrics bundle

use super::reducers::{
    active_table_count, average_order_value, inventory_alert_count, kitchen_queue_depth,
    percent_change, revenue_total, staff_on_duty,
};
use super::{TimeRange, Window};
use crate::inventory::InventoryItem;
use crate::models::{DiningTable, Order, StaffMember};
use chrono_tz::Tz;
use serde::Serialize;

/// Snapshot of every collection the dashboard reads
#[derive(Debug, Clone, Copy)]
pub struct DashboardInput<'a> {
    pub orders: &'a [Order],
    pub tables: &'a [DiningTable],
    pub inventory: &'a [InventoryItem],
    pub staff: &'a [StaffMember],
    pub range: TimeRange,
    pub now: i64,
    pub tz: Tz,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub range: TimeRange,
    pub window: Window,
    pub order_count: usize,
    pub total_revenue: f64,
    /// Percent vs. the previous window; 0 when that window had no revenue
    pub revenue_change: f64,
    /// Percent vs. the previous window; 0 when that window had no orders
    pub orders_change: f64,
    pub active_tables: usize,
    pub kitchen_queue: usize,
    pub inventory_alerts: usize,
    pub staff_on_duty: usize,
    pub average_order_value: f64,
}

impl DashboardMetrics {
    /// Orders are filtered to the range; tables, inventory and staff are
    /// current state and counted whole.
    pub fn compute(input: &DashboardInput<'_>) -> Self {
        let window = input.range.window(input.now, input.tz);
        let previous = input.range.previous_window(input.now, input.tz);

        let current_orders = window.select(input.orders);
        let previous_orders = previous.select(input.orders);

        let total_revenue = revenue_total(&current_orders);
        let previous_revenue = revenue_total(&previous_orders);

        Self {
            range: input.range,
            window,
            order_count: current_orders.len(),
            total_revenue,
            revenue_change: percent_change(total_revenue, previous_revenue),
            orders_change: percent_change(
                current_orders.len() as f64,
                previous_orders.len() as f64,
            ),
            active_tables: active_table_count(input.tables),
            kitchen_queue: kitchen_queue_depth(&current_orders),
            inventory_alerts: inventory_alert_count(input.inventory),
            staff_on_duty: staff_on_duty(input.staff),
            average_order_value: average_order_value(&current_orders),
        }
    }
}
