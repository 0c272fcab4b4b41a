//! Inventory records and stock status
//!
//! Status is a read-only projection of `(on_hand, par_level)`. It is
//! recomputed by [`InventoryItem`] on every write and never read from a
//! client payload.

mod alert;
mod item;
mod status;

pub use alert::{StockAlert, StockAlertKind, stock_alerts};
pub use item::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
pub use status::{StockStatus, derive_status};
