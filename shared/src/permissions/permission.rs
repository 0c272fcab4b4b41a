//! Permission tokens

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single capability token gating one feature or action.
///
/// Tokens are flat booleans: they are never combined or parameterized.
/// The wire form is the snake_case token (`"manage_inventory"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Permission {
    ViewDashboard = 0,
    ViewPos,
    CreateOrder,
    ViewOrders,
    ManageOrders,
    ViewKitchen,
    ManageKitchen,
    ViewTables,
    ManageTables,
    ViewMenu,
    ManageMenu,
    ViewInventory,
    ManageInventory,
    ViewStaff,
    ManageStaff,
    ViewReports,
    ManageReports,
    ViewSettings,
    ManageSettings,
    ExportData,
    ManageRestaurant,
}

/// Token that does not name any [`Permission`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl Permission {
    /// Number of distinct permission tokens
    pub const COUNT: usize = 21;

    /// Every permission, in declaration order
    pub const ALL: [Permission; Self::COUNT] = [
        Permission::ViewDashboard,
        Permission::ViewPos,
        Permission::CreateOrder,
        Permission::ViewOrders,
        Permission::ManageOrders,
        Permission::ViewKitchen,
        Permission::ManageKitchen,
        Permission::ViewTables,
        Permission::ManageTables,
        Permission::ViewMenu,
        Permission::ManageMenu,
        Permission::ViewInventory,
        Permission::ManageInventory,
        Permission::ViewStaff,
        Permission::ManageStaff,
        Permission::ViewReports,
        Permission::ManageReports,
        Permission::ViewSettings,
        Permission::ManageSettings,
        Permission::ExportData,
        Permission::ManageRestaurant,
    ];

    /// Bit position inside a [`PermissionSet`](super::PermissionSet)
    #[inline]
    pub const fn bit(self) -> u32 {
        1 << (self as u8)
    }

    /// Wire token
    pub const fn as_str(self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewPos => "view_pos",
            Permission::CreateOrder => "create_order",
            Permission::ViewOrders => "view_orders",
            Permission::ManageOrders => "manage_orders",
            Permission::ViewKitchen => "view_kitchen",
            Permission::ManageKitchen => "manage_kitchen",
            Permission::ViewTables => "view_tables",
            Permission::ManageTables => "manage_tables",
            Permission::ViewMenu => "view_menu",
            Permission::ManageMenu => "manage_menu",
            Permission::ViewInventory => "view_inventory",
            Permission::ManageInventory => "manage_inventory",
            Permission::ViewStaff => "view_staff",
            Permission::ManageStaff => "manage_staff",
            Permission::ViewReports => "view_reports",
            Permission::ManageReports => "manage_reports",
            Permission::ViewSettings => "view_settings",
            Permission::ManageSettings => "manage_settings",
            Permission::ExportData => "export_data",
            Permission::ManageRestaurant => "manage_restaurant",
        }
    }

    /// Human-readable description shown in the staff/role screens
    pub const fn description(self) -> &'static str {
        match self {
            Permission::ViewDashboard => "View dashboard and analytics",
            Permission::ViewPos => "Access POS terminal",
            Permission::CreateOrder => "Create new orders",
            Permission::ViewOrders => "View order history",
            Permission::ManageOrders => "Modify and manage orders",
            Permission::ViewKitchen => "View kitchen display system",
            Permission::ManageKitchen => "Manage kitchen orders and status",
            Permission::ViewTables => "View table status",
            Permission::ManageTables => "Modify table layout and status",
            Permission::ViewMenu => "View menu items",
            Permission::ManageMenu => "Add, edit, and delete menu items",
            Permission::ViewInventory => "View inventory levels",
            Permission::ManageInventory => "Modify inventory items",
            Permission::ViewStaff => "View staff members",
            Permission::ManageStaff => "Add, edit, and manage staff",
            Permission::ViewReports => "View reports and analytics",
            Permission::ManageReports => "Generate and manage reports",
            Permission::ViewSettings => "View system settings",
            Permission::ManageSettings => "Modify system settings",
            Permission::ExportData => "Export data and reports",
            Permission::ManageRestaurant => "Full restaurant management access",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}
