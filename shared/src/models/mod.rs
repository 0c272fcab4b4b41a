//! Data models
//!
//! Wire format is camelCase JSON, timestamps are epoch millis.

pub mod dining_table;
pub mod menu;
pub mod order;
pub mod restaurant;
pub mod settings;
pub mod staff;

pub use dining_table::{DiningTable, TableStatus};
pub use menu::{
    MenuCategory, MenuCategoryCreate, MenuItem, MenuItemUpdate, MenuPrice, RecipeIngredient,
};
pub use order::{Order, OrderCreate, OrderItem, OrderModifier, OrderStatus, OrderType};
pub use restaurant::{Restaurant, RestaurantUpdate};
pub use settings::{SettingsUpdate, SystemSettings};
pub use staff::{StaffCreate, StaffMember, StaffUpdate};
