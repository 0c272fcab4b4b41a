//! Stock threshold alerts
//!
//! Computed from the before/after snapshots of a single write. Delivery
//! (toast, push, email) belongs to the caller.

use super::{InventoryItem, StockStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockAlertKind {
    LowStock,
    OutOfStock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub kind: StockAlertKind,
    pub item_id: String,
    pub name: String,
    pub sku: String,
    pub on_hand: f64,
    pub unit: String,
}

impl StockAlert {
    fn for_item(kind: StockAlertKind, item: &InventoryItem) -> Self {
        Self {
            kind,
            item_id: item.id.clone(),
            name: item.name.clone(),
            sku: item.sku.clone(),
            on_hand: item.on_hand(),
            unit: item.unit.clone(),
        }
    }

    pub fn title(&self) -> String {
        match self.kind {
            StockAlertKind::LowStock => format!("Low Stock: {}", self.name),
            StockAlertKind::OutOfStock => format!("Out of Stock: {}", self.name),
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            StockAlertKind::LowStock => format!(
                "{} ({}) is at or below par level. Current: {} {}",
                self.name, self.sku, self.on_hand, self.unit
            ),
            StockAlertKind::OutOfStock => {
                format!("{} ({}) is out of stock", self.name, self.sku)
            }
        }
    }
}

/// Alerts for the status changes between `before` and `after`.
///
/// Read off the derived statuses, never the raw levels. Only downward
/// moves fire: staying low, or recovering, is silent. A drop straight from
/// In Stock to Out of Stock yields both kinds.
pub fn stock_alerts(before: &InventoryItem, after: &InventoryItem) -> Vec<StockAlert> {
    let (was, now) = (before.status(), after.status());
    let mut alerts = Vec::new();
    if was == StockStatus::InStock && now != StockStatus::InStock {
        alerts.push(StockAlert::for_item(StockAlertKind::LowStock, after));
    }
    if was != StockStatus::OutOfStock && now == StockStatus::OutOfStock {
        alerts.push(StockAlert::for_item(StockAlertKind::OutOfStock, after));
    }
    alerts
}
