//! A7 POS server core
//!
//! Request-handling layer on top of [`shared`]. It owns no rules of its
//! own: every privileged call goes through [`auth::AuthGuard`], which asks
//! the shared permission matrix, and every inventory write goes through the
//! shared status deriver.
//!
//! # Module layout
//!
//! ```text
//! a7-server/src/
//! ├── core/          # Config, ServerState
//! ├── auth/          # JWT, AuthGuard, CurrentUser
//! ├── store/         # In-memory DashMap stores
//! ├── services/      # Inventory, orders, staff, tables, menu, dashboard,
//! │                  # restaurant profile, settings
//! └── utils/         # Logger, validation
//! ```
//!
//! HTTP routing is left to the embedding binary; services take the raw
//! `Authorization` header value and return [`AppResult`].

pub mod auth;
pub mod core;
pub mod services;
pub mod store;
pub mod utils;

pub use auth::{AuthGuard, CurrentUser, JwtService};
pub use core::{Config, ServerState};
pub use store::Stores;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Security event on the `security` target
///
/// ```ignore
/// security_log!(WARN, "permission_denied", staff_id = %user.staff_id, required = "manage_orders");
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(target: "security", event = $event, level = "WARN", $($arg)*);
    };
    (ERROR, $event:expr, $($arg:tt)*) => {
        tracing::error!(target: "security", event = $event, level = "ERROR", $($arg)*);
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(target: "security", event = $event, level = "INFO", $($arg)*);
    };
}

// Audit logging macro - who changed what
#[macro_export]
macro_rules! audit_log {
    ($user_id:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            user_id = $user_id,
            action = $action,
            resource = $resource,
            "AUDIT"
        );
    };
    ($user_id:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            user_id = $user_id,
            action = $action,
            resource = $resource,
            details = $details,
            "AUDIT"
        );
    };
}
