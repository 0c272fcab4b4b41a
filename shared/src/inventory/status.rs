//! Stock status derivation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-state stock level, always derived from `(on_hand, par_level)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub const fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }

    /// Counts toward the dashboard's inventory alerts
    pub const fn is_alert(self) -> bool {
        !matches!(self, StockStatus::InStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derive the stock status.
///
/// Reaching par level is already `LowStock`. Total over every `f64`:
/// a NaN fails both comparisons and lands on `InStock`.
pub fn derive_status(on_hand: f64, par_level: f64) -> StockStatus {
    if on_hand <= 0.0 {
        StockStatus::OutOfStock
    } else if on_hand <= par_level {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}
