//! Counting and summing reducers
//!
//! Every function folds the collection it is given from scratch.

use super::money::{to_decimal, to_f64};
use crate::inventory::InventoryItem;
use crate::models::{DiningTable, Order, StaffMember};
use rust_decimal::Decimal;

/// Sum of `order.total`
pub fn revenue_total(orders: &[Order]) -> f64 {
    to_f64(orders.iter().map(|o| to_decimal(o.total)).sum::<Decimal>())
}

/// `(current - previous) / previous * 100`; 0 when there is no previous value
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    let change = (current - previous) / previous * 100.0;
    if change.is_finite() { change } else { 0.0 }
}

/// Orders still waiting on the kitchen
pub fn kitchen_queue_depth(orders: &[Order]) -> usize {
    orders.iter().filter(|o| o.status.is_kitchen_active()).count()
}

/// Tables in any state but vacant
pub fn active_table_count(tables: &[DiningTable]) -> usize {
    tables.iter().filter(|t| t.status.is_active()).count()
}

/// Items whose derived status is not In Stock
pub fn inventory_alert_count(items: &[InventoryItem]) -> usize {
    items.iter().filter(|i| i.status().is_alert()).count()
}

/// Staff currently clocked in
pub fn staff_on_duty(staff: &[StaffMember]) -> usize {
    staff.iter().filter(|s| s.is_active).count()
}

pub fn average_order_value(orders: &[Order]) -> f64 {
    if orders.is_empty() {
        return 0.0;
    }
    let total: Decimal = orders.iter().map(|o| to_decimal(o.total)).sum();
    to_f64(total / Decimal::from(orders.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderStatus, OrderType, TableStatus};

    fn order(id: &str, status: OrderStatus, total: f64) -> Order {
        Order {
            id: id.to_string(),
            order_number: id.to_string(),
            order_type: OrderType::Takeout,
            table_id: None,
            status,
            items: Vec::new(),
            subtotal: total,
            tax: 0.0,
            tip: 0.0,
            total,
            created_at: 0,
        }
    }

    #[test]
    fn test_revenue_total() {
        let orders = vec![
            order("1", OrderStatus::Paid, 10.1),
            order("2", OrderStatus::Paid, 20.2),
            order("3", OrderStatus::Pending, 0.0),
        ];
        assert_eq!(revenue_total(&orders), 30.3);
        assert_eq!(revenue_total(&[]), 0.0);
    }

    #[test]
    fn test_percent_change_zero_previous() {
        for current in [0.0, 1.0, 1234.5, -3.0] {
            assert_eq!(percent_change(current, 0.0), 0.0);
        }
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(50.0, 100.0), -50.0);
    }

    #[test]
    fn test_kitchen_queue_depth() {
        let orders: Vec<_> = OrderStatus::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| order(&i.to_string(), *s, 1.0))
            .collect();
        assert_eq!(kitchen_queue_depth(&orders), 2);
    }

    #[test]
    fn test_active_tables() {
        let mut tables = vec![
            DiningTable::new("t1", "T1", 2),
            DiningTable::new("t2", "T2", 4),
            DiningTable::new("t3", "T3", 6),
        ];
        tables[1].status = TableStatus::Seated;
        tables[2].status = TableStatus::Cleaning;
        assert_eq!(active_table_count(&tables), 2);
    }

    #[test]
    fn test_average_order_value() {
        assert_eq!(average_order_value(&[]), 0.0);
        let orders = vec![
            order("1", OrderStatus::Paid, 10.0),
            order("2", OrderStatus::Paid, 20.0),
            order("3", OrderStatus::Paid, 20.0),
        ];
        assert_eq!(average_order_value(&orders), 16.67);
    }
}
