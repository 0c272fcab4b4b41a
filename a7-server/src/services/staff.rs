//! Staff service
//!
//! Role edits land in the same map the guard reads, so they apply from the
//! caller's very next request.

use shared::models::{StaffCreate, StaffMember, StaffUpdate};
use shared::permissions::{Permission, PermissionMatrix};
use shared::util::now_millis;

use crate::audit_log;
use crate::auth::{AuthGuard, CurrentUser};
use crate::core::ServerState;
use crate::store::Stores;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct StaffService {
    guard: AuthGuard,
    stores: Stores,
}

impl StaffService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            guard: state.guard().clone(),
            stores: state.stores().clone(),
        }
    }

    /// Staff of the caller's restaurant, by name
    pub fn list(&self, authorization: Option<&str>) -> AppResult<Vec<StaffMember>> {
        let user = self.guard.authorize(authorization, Permission::ViewStaff)?;
        Ok(self.stores.staff_of(&user.restaurant_id))
    }

    /// New member in the caller's restaurant
    pub fn create(
        &self,
        authorization: Option<&str>,
        payload: StaffCreate,
    ) -> AppResult<StaffMember> {
        let user = self.guard.authorize(authorization, Permission::ManageStaff)?;
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&payload.id, "id", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;

        if let Some(id) = &payload.id
            && self.stores.staff.contains_key(id)
        {
            return Err(AppError::with_message(
                ErrorCode::StaffAlreadyExists,
                format!("Staff member {id} already exists"),
            ));
        }

        let member = StaffMember::create(payload, user.restaurant_id.clone());
        self.stores.staff.insert(member.id.clone(), member.clone());
        audit_log!(
            user.staff_id.as_str(),
            "staff.create",
            member.id.as_str(),
            member.role.as_str()
        );
        Ok(member)
    }

    pub fn update(
        &self,
        authorization: Option<&str>,
        id: &str,
        update: StaffUpdate,
    ) -> AppResult<StaffMember> {
        let user = self.guard.authorize(authorization, Permission::ManageStaff)?;
        if let Some(name) = &update.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&update.email, "email", MAX_EMAIL_LEN)?;

        let (member, old_role) = {
            let mut member = self.find_mut(&user, id)?;
            let old_role = member.role;
            member.apply_update(update);
            (member.value().clone(), old_role)
        };

        if old_role != member.role {
            tracing::info!(
                staff_id = %member.id,
                from = %old_role,
                to = %member.role,
                "Staff role changed"
            );
            audit_log!(
                user.staff_id.as_str(),
                "staff.role_change",
                member.id.as_str(),
                format!("{old_role} -> {}", member.role).as_str()
            );
        } else {
            audit_log!(user.staff_id.as_str(), "staff.update", member.id.as_str());
        }
        Ok(member)
    }

    /// Clock in or out. Anyone may clock themselves; clocking someone else
    /// takes `manage_staff`.
    pub fn toggle_clock(&self, authorization: Option<&str>, id: &str) -> AppResult<StaffMember> {
        let user = self.guard.authenticate(authorization)?;
        if user.staff_id != id {
            self.guard.require(&user, Permission::ManageStaff)?;
        }

        let member = {
            let mut member = self.find_mut(&user, id)?;
            member.toggle_clock(now_millis());
            member.value().clone()
        };

        audit_log!(
            user.staff_id.as_str(),
            if member.is_active { "staff.clock_in" } else { "staff.clock_out" },
            member.id.as_str()
        );
        Ok(member)
    }

    /// The caller's grant set, for the UI to decide what to render
    pub fn my_permissions(&self, authorization: Option<&str>) -> AppResult<Vec<Permission>> {
        let user = self.guard.authenticate(authorization)?;
        Ok(PermissionMatrix::standard()
            .role_permissions(user.role)
            .to_vec())
    }

    /// Members of other restaurants are reported as not found
    fn find_mut(
        &self,
        user: &CurrentUser,
        id: &str,
    ) -> AppResult<dashmap::mapref::one::RefMut<'_, String, StaffMember>> {
        match self.stores.staff.get_mut(id) {
            Some(member) if member.restaurant_id == user.restaurant_id => Ok(member),
            _ => Err(AppError::with_message(
                ErrorCode::StaffNotFound,
                format!("Staff member {id} not found"),
            )),
        }
    }
}
