//! Core server modules
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - shared handles every service is built from

pub mod config;
pub mod state;

pub use config::Config;
pub use state::ServerState;
