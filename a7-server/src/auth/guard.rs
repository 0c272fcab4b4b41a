//! Authorization guard
//!
//! Two steps, mirroring the HTTP distinction:
//! - [`AuthGuard::authenticate`]: who is calling (401 on failure)
//! - [`AuthGuard::require`]: may they do this (403 on failure)
//!
//! The role is read from the staff store on every call. Nothing about a
//! staff member's grants is cached between requests.
//!
//! A server serves exactly one restaurant. Staff of any other restaurant
//! are known callers but are refused (403) before any store is read.

use std::sync::Arc;

use dashmap::DashMap;
use shared::models::StaffMember;
use shared::permissions::{Permission, PermissionMatrix, Role};

use super::jwt::JwtService;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Authenticated caller
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub staff_id: String,
    pub restaurant_id: String,
    pub name: String,
    /// Role at authentication time
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct AuthGuard {
    jwt: Arc<JwtService>,
    staff: Arc<DashMap<String, StaffMember>>,
    restaurant_id: Arc<str>,
}

impl AuthGuard {
    pub fn new(
        jwt: Arc<JwtService>,
        staff: Arc<DashMap<String, StaffMember>>,
        restaurant_id: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            jwt,
            staff,
            restaurant_id: restaurant_id.into(),
        }
    }

    /// The restaurant this server is bound to
    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    /// Resolve the caller from a raw `Authorization` header value
    pub fn authenticate(&self, authorization: Option<&str>) -> AppResult<CurrentUser> {
        let Some(header) = authorization else {
            security_log!(WARN, "auth_missing", reason = "no authorization header");
            return Err(AppError::unauthorized());
        };

        let Some(token) = JwtService::extract_from_header(header) else {
            security_log!(WARN, "auth_failed", reason = "malformed authorization header");
            return Err(AppError::invalid_token("Expected a Bearer token"));
        };

        let claims = self.jwt.validate_token(token).map_err(|e| {
            security_log!(WARN, "auth_failed", error = %e);
            AppError::from(e)
        })?;

        let Some(member) = self.staff.get(&claims.sub) else {
            security_log!(WARN, "auth_unknown_staff", staff_id = %claims.sub);
            return Err(AppError::unauthorized());
        };

        if member.restaurant_id != claims.restaurant_id {
            security_log!(
                WARN,
                "auth_restaurant_mismatch",
                staff_id = %claims.sub,
                token_restaurant = %claims.restaurant_id
            );
            return Err(AppError::invalid_token("Token restaurant does not match"));
        }

        if member.restaurant_id.as_str() != &*self.restaurant_id {
            security_log!(
                WARN,
                "restaurant_mismatch",
                staff_id = %member.id,
                staff_restaurant = %member.restaurant_id,
                served_restaurant = %self.restaurant_id
            );
            return Err(
                AppError::permission_denied("Staff member belongs to another restaurant")
                    .with_detail("restaurant", member.restaurant_id.clone()),
            );
        }

        tracing::debug!(staff_id = %member.id, role = %member.role, "Staff authenticated");

        Ok(CurrentUser {
            staff_id: member.id.clone(),
            restaurant_id: member.restaurant_id.clone(),
            name: member.name.clone(),
            role: member.role,
        })
    }

    /// Check one permission against the caller's role as stored right now
    pub fn require(&self, user: &CurrentUser, permission: Permission) -> AppResult<()> {
        let role = self.current_role(user)?;
        PermissionMatrix::standard()
            .authorize(role, permission)
            .inspect_err(|_| {
                security_log!(
                    WARN,
                    "permission_denied",
                    staff_id = %user.staff_id,
                    role = role.as_str(),
                    required = permission.as_str()
                );
            })
    }

    /// Authenticate then require
    pub fn authorize(
        &self,
        authorization: Option<&str>,
        permission: Permission,
    ) -> AppResult<CurrentUser> {
        let user = self.authenticate(authorization)?;
        self.require(&user, permission)?;
        Ok(user)
    }

    /// Fresh role lookup. A deleted staff member is no longer authenticated.
    fn current_role(&self, user: &CurrentUser) -> AppResult<Role> {
        match self.staff.get(&user.staff_id) {
            Some(member) => Ok(member.role),
            None => {
                security_log!(WARN, "auth_unknown_staff", staff_id = %user.staff_id);
                Err(AppError::unauthorized())
            }
        }
    }
}
