//! Role → grant-set matrix
//!
//! The one authoritative grant table. The UI uses it to decide what to
//! render, the server uses it to decide what to reject; both link this
//! module, so the two can never disagree.

use super::{Permission, PermissionSet, Role};
use crate::error::{AppError, AppResult};

use Permission::*;

const MANAGER_GRANTS: PermissionSet = PermissionSet::all();

const SERVER_GRANTS: PermissionSet = PermissionSet::from_slice(&[
    ViewDashboard,
    ViewPos,
    CreateOrder,
    ViewOrders,
    ViewKitchen,
    ViewTables,
    ManageTables,
    ViewMenu,
]);

const KITCHEN_GRANTS: PermissionSet =
    PermissionSet::from_slice(&[ViewKitchen, ManageKitchen, ViewOrders]);

const CASHIER_GRANTS: PermissionSet = PermissionSet::from_slice(&[
    ViewDashboard,
    ViewPos,
    CreateOrder,
    ViewOrders,
    ViewReports,
    ExportData,
]);

static STANDARD: PermissionMatrix =
    PermissionMatrix::from_grants([MANAGER_GRANTS, SERVER_GRANTS, KITCHEN_GRANTS, CASHIER_GRANTS]);

// Every grant set is non-empty and Manager holds everything any other role holds.
const _: () = {
    let grants = [MANAGER_GRANTS, SERVER_GRANTS, KITCHEN_GRANTS, CASHIER_GRANTS];
    let mut i = 0;
    while i < grants.len() {
        assert!(!grants[i].is_empty());
        assert!(grants[Role::Manager.index()].is_superset_of(grants[i]));
        i += 1;
    }
};

/// What a guarded UI element or route asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement<'a> {
    One(Permission),
    AnyOf(&'a [Permission]),
    AllOf(&'a [Permission]),
}

/// Static mapping from every [`Role`] to its grant set
#[derive(Debug)]
pub struct PermissionMatrix {
    grants: [PermissionSet; Role::COUNT],
}

impl PermissionMatrix {
    const fn from_grants(grants: [PermissionSet; Role::COUNT]) -> Self {
        Self { grants }
    }

    /// The process-wide grant table
    #[inline]
    pub fn standard() -> &'static PermissionMatrix {
        &STANDARD
    }

    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.grants[role.index()].contains(permission)
    }

    /// Empty list → `false`
    pub fn has_any_permission(&self, role: Role, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(role, *p))
    }

    /// Empty list → `true`
    pub fn has_all_permissions(&self, role: Role, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(role, *p))
    }

    pub fn role_permissions(&self, role: Role) -> PermissionSet {
        self.grants[role.index()]
    }

    pub fn satisfies(&self, role: Role, requirement: Requirement<'_>) -> bool {
        match requirement {
            Requirement::One(p) => self.has_permission(role, p),
            Requirement::AnyOf(ps) => self.has_any_permission(role, ps),
            Requirement::AllOf(ps) => self.has_all_permissions(role, ps),
        }
    }

    /// Check untyped tokens coming off the wire.
    ///
    /// An unrecognized role has an empty grant set and an unrecognized
    /// permission is never granted; neither is an error.
    pub fn check_named(&self, role: &str, permission: &str) -> bool {
        match (role.parse::<Role>(), permission.parse::<Permission>()) {
            (Ok(role), Ok(permission)) => self.has_permission(role, permission),
            _ => false,
        }
    }

    /// Like [`has_permission`](Self::has_permission) but yields the Forbidden
    /// error a request handler propagates to the caller.
    pub fn authorize(&self, role: Role, permission: Permission) -> AppResult<()> {
        if self.has_permission(role, permission) {
            return Ok(());
        }
        Err(forbidden(role, permission))
    }
}

/// Forbidden error naming the missing permission and the caller's role
pub fn forbidden(role: Role, permission: Permission) -> AppError {
    AppError::permission_denied(format!(
        "Role {} lacks permission {}",
        role.as_str(),
        permission.as_str()
    ))
    .with_detail("required", permission.as_str())
    .with_detail("role", role.as_str())
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    STANDARD.has_permission(role, permission)
}

pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    STANDARD.has_any_permission(role, permissions)
}

pub fn has_all_permissions(role: Role, permissions: &[Permission]) -> bool {
    STANDARD.has_all_permissions(role, permissions)
}

pub fn get_role_permissions(role: Role) -> PermissionSet {
    STANDARD.role_permissions(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn matrix() -> &'static PermissionMatrix {
        PermissionMatrix::standard()
    }

    #[test]
    fn test_manager_is_superset_of_every_role() {
        for p in Permission::ALL {
            for role in Role::ALL {
                if matrix().has_permission(role, p) {
                    assert!(
                        matrix().has_permission(Role::Manager, p),
                        "{} grants {} but Manager does not",
                        role,
                        p
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_role_has_grants() {
        for role in Role::ALL {
            assert!(!matrix().role_permissions(role).is_empty());
        }
    }

    #[test]
    fn test_kitchen_grant_set() {
        assert_eq!(
            matrix().role_permissions(Role::Kitchen).to_vec(),
            vec![ViewOrders, ViewKitchen, ManageKitchen]
        );
        assert!(!has_permission(Role::Kitchen, ManageOrders));
        assert!(has_permission(Role::Manager, ManageOrders));
    }

    #[test]
    fn test_server_and_cashier_grants() {
        assert_eq!(matrix().role_permissions(Role::Server).len(), 8);
        assert!(has_permission(Role::Server, ManageTables));
        assert!(!has_permission(Role::Server, ViewInventory));

        assert_eq!(matrix().role_permissions(Role::Cashier).len(), 6);
        assert!(has_permission(Role::Cashier, ExportData));
        assert!(!has_permission(Role::Cashier, ViewKitchen));
    }

    #[test]
    fn test_any_and_all_agree_with_single_checks() {
        let lists: [&[Permission]; 5] = [
            &[],
            &[ManageOrders],
            &[ViewKitchen, ManageOrders],
            &[ViewDashboard, ViewPos, CreateOrder],
            &Permission::ALL,
        ];
        for role in Role::ALL {
            for list in lists {
                let any = list.iter().any(|p| has_permission(role, *p));
                let all = list.iter().all(|p| has_permission(role, *p));
                assert_eq!(has_any_permission(role, list), any);
                assert_eq!(has_all_permissions(role, list), all);
            }
        }
    }

    #[test]
    fn test_empty_lists() {
        for role in Role::ALL {
            assert!(!has_any_permission(role, &[]));
            assert!(has_all_permissions(role, &[]));
        }
    }

    #[test]
    fn test_role_permissions_is_a_copy() {
        let before = get_role_permissions(Role::Kitchen);
        let widened: PermissionSet = before.iter().chain([ManageRestaurant]).collect();
        assert!(widened.contains(ManageRestaurant));
        assert_eq!(get_role_permissions(Role::Kitchen), before);
        assert!(!has_permission(Role::Kitchen, ManageRestaurant));
    }

    #[test]
    fn test_check_named_unknowns_are_denied() {
        assert!(matrix().check_named("Manager", "manage_inventory"));
        assert!(!matrix().check_named("Kitchen", "manage_orders"));
        assert!(!matrix().check_named("Owner", "view_dashboard"));
        assert!(!matrix().check_named("Manager", "launch_rockets"));
        assert!(!matrix().check_named("", ""));
    }

    #[test]
    fn test_satisfies() {
        assert!(matrix().satisfies(Role::Kitchen, Requirement::One(ViewKitchen)));
        assert!(matrix().satisfies(Role::Kitchen, Requirement::AnyOf(&[ManageMenu, ViewOrders])));
        assert!(!matrix().satisfies(Role::Kitchen, Requirement::AllOf(&[ManageMenu, ViewOrders])));
    }

    #[test]
    fn test_authorize_forbidden_carries_context() {
        assert!(matrix().authorize(Role::Manager, ManageOrders).is_ok());

        let err = matrix().authorize(Role::Kitchen, ManageOrders).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert!(err.is_forbidden());
        assert_eq!(err.detail_str("required"), Some("manage_orders"));
        assert_eq!(err.detail_str("role"), Some("Kitchen"));
    }
}
