//! Authentication and authorization
//!
//! - [`JwtService`] - HS256 tokens naming a staff member
//! - [`AuthGuard`] - resolves callers and checks the permission matrix
//! - [`CurrentUser`] - authenticated caller context

pub mod guard;
pub mod jwt;

pub use guard::{AuthGuard, CurrentUser};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
