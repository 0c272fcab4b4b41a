//! Inventory item model

use super::{StockStatus, derive_status};
use crate::util::snowflake_id;
use serde::{Deserialize, Serialize};

/// Inventory record.
///
/// `on_hand`, `par_level` and `status` are private: every path that changes
/// a level goes through this type and re-derives the status, and incoming
/// JSON never supplies one (see [`InventoryItemRecord`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "InventoryItemRecord")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub sku: String,
    on_hand: f64,
    par_level: f64,
    pub unit: String,
    pub unit_cost: f64,
    status: StockStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Wire shape accepted when reading an item back; a `status` key, if any,
/// is dropped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryItemRecord {
    id: String,
    name: String,
    sku: String,
    on_hand: f64,
    par_level: f64,
    unit: String,
    unit_cost: f64,
    #[serde(default)]
    created_at: i64,
    #[serde(default)]
    updated_at: i64,
}

impl From<InventoryItemRecord> for InventoryItem {
    fn from(r: InventoryItemRecord) -> Self {
        Self {
            status: derive_status(r.on_hand, r.par_level),
            id: r.id,
            name: r.name,
            sku: r.sku,
            on_hand: r.on_hand,
            par_level: r.par_level,
            unit: r.unit,
            unit_cost: r.unit_cost,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemCreate {
    /// Client-chosen id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub sku: String,
    pub on_hand: f64,
    pub par_level: f64,
    pub unit: String,
    pub unit_cost: f64,
}

/// Update inventory item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub on_hand: Option<f64>,
    pub par_level: Option<f64>,
    pub unit: Option<String>,
    pub unit_cost: Option<f64>,
}

impl InventoryItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.on_hand.is_none()
            && self.par_level.is_none()
            && self.unit.is_none()
            && self.unit_cost.is_none()
    }
}

impl InventoryItem {
    pub fn create(payload: InventoryItemCreate, now: i64) -> Self {
        Self {
            id: payload.id.unwrap_or_else(|| snowflake_id().to_string()),
            name: payload.name,
            sku: payload.sku,
            on_hand: payload.on_hand,
            par_level: payload.par_level,
            unit: payload.unit,
            unit_cost: payload.unit_cost,
            status: derive_status(payload.on_hand, payload.par_level),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn on_hand(&self) -> f64 {
        self.on_hand
    }

    #[inline]
    pub fn par_level(&self) -> f64 {
        self.par_level
    }

    #[inline]
    pub fn status(&self) -> StockStatus {
        self.status
    }

    /// Apply a partial update. Levels missing from the update keep their
    /// current values and the status is re-derived from the result.
    pub fn apply_update(&mut self, update: InventoryItemUpdate, now: i64) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(sku) = update.sku {
            self.sku = sku;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(unit_cost) = update.unit_cost {
            self.unit_cost = unit_cost;
        }
        let on_hand = update.on_hand.unwrap_or(self.on_hand);
        let par_level = update.par_level.unwrap_or(self.par_level);
        self.set_levels(on_hand, par_level);
        self.updated_at = now;
    }

    /// Receive stock: `on_hand += quantity`
    pub fn receive(&mut self, quantity: f64, now: i64) {
        self.set_levels(self.on_hand + quantity, self.par_level);
        self.updated_at = now;
    }

    fn set_levels(&mut self, on_hand: f64, par_level: f64) {
        self.on_hand = on_hand;
        self.par_level = par_level;
        self.status = derive_status(on_hand, par_level);
    }
}
