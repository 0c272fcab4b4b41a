//! Shared core for A7 POS
//!
//! The one authoritative copy of the rules both the UI layer and the
//! server link against: the role/permission matrix, inventory status
//! derivation, domain models, dashboard analytics and the unified error
//! system.

pub mod analytics;
pub mod error;
pub mod inventory;
pub mod models;
pub mod permissions;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use inventory::{InventoryItem, StockStatus, derive_status};
pub use permissions::{Permission, PermissionMatrix, PermissionSet, Role};
