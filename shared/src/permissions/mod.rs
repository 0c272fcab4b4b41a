//! Role-based permissions
//!
//! - [`Role`] / [`Permission`]: closed enums, typos are compile errors
//! - [`PermissionSet`]: copyable grant set
//! - [`PermissionMatrix`]: the static grant table and its checks
//! - [`nav`]: which app routes a role may open

mod matrix;
pub mod nav;
mod permission;
mod role;
mod set;

pub use matrix::{
    PermissionMatrix, Requirement, forbidden, get_role_permissions, has_all_permissions,
    has_any_permission, has_permission,
};
pub use permission::{Permission, UnknownPermission};
pub use role::{Role, UnknownRole};
pub use set::PermissionSet;
