//! Staff Model

use crate::permissions::Role;
use crate::util::snowflake_id;
use serde::{Deserialize, Serialize};

/// Staff member. `role` is the only input to authorization decisions and is
/// looked up again on every check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub role: Role,
    /// Clocked in
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Epoch millis of the last clock-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_clock_in: Option<i64>,
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCreate {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Update staff payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
    pub email: Option<String>,
}

impl StaffMember {
    /// New members start clocked out
    pub fn create(payload: StaffCreate, restaurant_id: impl Into<String>) -> Self {
        Self {
            id: payload
                .id
                .unwrap_or_else(|| format!("staff-{}", snowflake_id())),
            restaurant_id: restaurant_id.into(),
            name: payload.name,
            role: payload.role,
            is_active: false,
            avatar: payload.avatar,
            email: payload.email,
            last_clock_in: None,
        }
    }

    pub fn apply_update(&mut self, update: StaffUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
    }

    /// Flip clocked in/out. Clocking out keeps the last clock-in time.
    pub fn toggle_clock(&mut self, now: i64) -> bool {
        self.is_active = !self.is_active;
        if self.is_active {
            self.last_clock_in = Some(now);
        }
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> StaffMember {
        StaffMember::create(
            StaffCreate {
                id: Some("s2".to_string()),
                name: "Mike".to_string(),
                role: Role::Kitchen,
                avatar: String::new(),
                email: None,
            },
            "r1",
        )
    }

    #[test]
    fn test_create_starts_clocked_out() {
        let m = member();
        assert!(!m.is_active);
        assert!(m.last_clock_in.is_none());
        assert_eq!(m.restaurant_id, "r1");
    }

    #[test]
    fn test_toggle_clock() {
        let mut m = member();
        assert!(m.toggle_clock(100));
        assert_eq!(m.last_clock_in, Some(100));
        assert!(!m.toggle_clock(200));
        assert_eq!(m.last_clock_in, Some(100));
    }

    #[test]
    fn test_role_change() {
        let mut m = member();
        m.apply_update(StaffUpdate {
            role: Some(Role::Manager),
            ..Default::default()
        });
        assert_eq!(m.role, Role::Manager);
        assert_eq!(m.name, "Mike");
    }

    #[test]
    fn test_wire_role_name() {
        let value = serde_json::to_value(member()).unwrap();
        assert_eq!(value["role"], "Kitchen");
        assert_eq!(value["isActive"], false);
    }
}
