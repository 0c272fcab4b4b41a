//! Dining Table Model

use super::OrderStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Vacant,
    Seated,
    Served,
    Cleaning,
}

impl TableStatus {
    pub const fn is_active(self) -> bool {
        !matches!(self, TableStatus::Vacant)
    }
}

/// Dining table on the floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: String,
    pub label: String,
    pub capacity: u32,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_order_id: Option<String>,
}

impl DiningTable {
    pub fn new(id: impl Into<String>, label: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            capacity,
            status: TableStatus::Vacant,
            server_id: None,
            current_order_id: None,
        }
    }

    /// Seat the table and link the order being opened on it
    pub fn seat(&mut self, order_id: impl Into<String>) {
        self.status = TableStatus::Seated;
        self.current_order_id = Some(order_id.into());
    }

    /// Follow an order status change. Paying releases the order link.
    pub fn follow_order(&mut self, status: OrderStatus) {
        let Some(next) = status.table_status() else {
            return;
        };
        self.status = next;
        if status == OrderStatus::Paid {
            self.current_order_id = None;
        }
    }

    /// Bussed and ready for the next party
    pub fn reset(&mut self) {
        self.status = TableStatus::Vacant;
        self.current_order_id = None;
    }
}
