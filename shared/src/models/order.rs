//! Order Model

use super::TableStatus;
use crate::util::snowflake_id;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle: `pending → preparing → ready → served → paid`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Paid,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Paid,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Paid => "paid",
        }
    }

    /// Following stage; `None` once paid
    pub const fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served => Some(OrderStatus::Paid),
            OrderStatus::Paid => None,
        }
    }

    /// Counts toward the kitchen queue
    pub const fn is_kitchen_active(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Preparing)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Paid)
    }

    /// Forward-only: any later stage may be reached, nothing moves back
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        target > self
    }

    /// Table status an order at this stage puts its table into
    pub const fn table_status(self) -> Option<TableStatus> {
        match self {
            OrderStatus::Served => Some(TableStatus::Served),
            OrderStatus::Paid => Some(TableStatus::Cleaning),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    DineIn,
    Takeout,
    Delivery,
}

/// Modifier applied to a line (e.g. "Extra cheese")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderModifier {
    pub name: String,
    pub price_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    pub qty: u32,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<OrderModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderItem {
    /// `qty * unit_price`, the amount the sales mix attributes to a category
    pub fn line_total(&self) -> f64 {
        self.qty as f64 * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub tip: f64,
    pub total: f64,
    /// Epoch millis
    pub created_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(default)]
    pub id: Option<String>,
    pub order_number: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub table_id: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub tax: f64,
    #[serde(default)]
    pub tip: f64,
    pub total: f64,
    /// Backdated orders (imports); defaults to now
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl Order {
    pub fn create(payload: OrderCreate, now: i64) -> Self {
        Self {
            id: payload.id.unwrap_or_else(|| snowflake_id().to_string()),
            order_number: payload.order_number,
            order_type: payload.order_type,
            table_id: payload.table_id,
            status: payload.status,
            items: payload.items,
            subtotal: payload.subtotal,
            tax: payload.tax,
            tip: payload.tip,
            total: payload.total,
            created_at: payload.created_at.unwrap_or(now),
        }
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.qty)).sum()
    }
}
