//! Staff roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed staff classification that determines capability grants.
///
/// Assigned to a staff member at creation; only a staff update by someone
/// holding `manage_staff` can change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Role {
    Manager = 0,
    Server,
    Kitchen,
    Cashier,
}

/// Role string that does not name any [`Role`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const COUNT: usize = 4;

    pub const ALL: [Role; Self::COUNT] = [Role::Manager, Role::Server, Role::Kitchen, Role::Cashier];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Server => "Server",
            Role::Kitchen => "Kitchen",
            Role::Cashier => "Cashier",
        }
    }

    /// Label used by the UI
    pub const fn display_name(self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Server => "Server",
            Role::Kitchen => "Kitchen Staff",
            Role::Cashier => "Cashier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
