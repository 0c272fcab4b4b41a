//! Request-level services
//!
//! Every method takes the raw `Authorization` header value first and runs
//! it through [`AuthGuard`](crate::auth::AuthGuard) before touching a store.

pub mod dashboard;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod restaurant;
pub mod settings;
pub mod staff;
pub mod tables;

pub use dashboard::DashboardService;
pub use inventory::{InventoryService, InventoryWrite};
pub use menu::{MenuService, MenuSnapshot};
pub use orders::OrderService;
pub use restaurant::RestaurantService;
pub use settings::SettingsService;
pub use staff::StaffService;
pub use tables::TableService;
