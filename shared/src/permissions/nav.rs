//! Navigation gating for the app shell

use super::{Permission, PermissionMatrix, Role};
use serde::Serialize;

/// One entry of the sidebar navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavRoute {
    pub path: &'static str,
    pub label: &'static str,
    pub permission: Permission,
}

pub const NAV_ROUTES: &[NavRoute] = &[
    NavRoute { path: "/app", label: "Dashboard", permission: Permission::ViewDashboard },
    NavRoute { path: "/app/pos", label: "POS Terminal", permission: Permission::ViewPos },
    NavRoute { path: "/app/orders", label: "Orders", permission: Permission::ViewOrders },
    NavRoute { path: "/app/kitchen", label: "Kitchen KDS", permission: Permission::ViewKitchen },
    NavRoute { path: "/app/tables", label: "Tables", permission: Permission::ViewTables },
    NavRoute { path: "/app/menu", label: "Menu Mgmt", permission: Permission::ViewMenu },
    NavRoute { path: "/app/inventory", label: "Inventory", permission: Permission::ViewInventory },
    NavRoute { path: "/app/staff", label: "Staff & Shifts", permission: Permission::ViewStaff },
    NavRoute { path: "/app/reports", label: "Reports", permission: Permission::ViewReports },
    NavRoute { path: "/app/settings", label: "Settings", permission: Permission::ViewSettings },
];

/// Exact-match lookup; paths outside the table are not gated here
pub fn required_permission_for_path(path: &str) -> Option<Permission> {
    NAV_ROUTES
        .iter()
        .find(|r| r.path == path)
        .map(|r| r.permission)
}

pub fn visible_routes(role: Role) -> Vec<&'static NavRoute> {
    let matrix = PermissionMatrix::standard();
    NAV_ROUTES
        .iter()
        .filter(|r| matrix.has_permission(role, r.permission))
        .collect()
}

/// Landing page after login: first visible route
pub fn default_route(role: Role) -> Option<&'static str> {
    visible_routes(role).first().map(|r| r.path)
}
