use std::sync::Arc;

use chrono_tz::Tz;

use crate::auth::{AuthGuard, JwtService};
use crate::core::Config;
use crate::services::{
    DashboardService, InventoryService, MenuService, OrderService, RestaurantService,
    SettingsService, StaffService, TableService,
};
use crate::store::Stores;
use crate::utils::AppResult;

/// Server state
///
/// Cheap to clone: every field is an `Arc` or a bundle of `Arc`s, so
/// services hold their own copy instead of borrowing.
#[derive(Debug, Clone)]
pub struct ServerState {
    config: Arc<Config>,
    jwt: Arc<JwtService>,
    stores: Stores,
    guard: AuthGuard,
}

impl ServerState {
    pub fn new(config: Config) -> Self {
        Self::with_stores(config, Stores::new())
    }

    /// Build on existing stores (fixtures, restored snapshots)
    pub fn with_stores(config: Config, stores: Stores) -> Self {
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        let guard = AuthGuard::new(
            jwt.clone(),
            stores.staff.clone(),
            config.restaurant_id.as_str(),
        );
        tracing::info!(
            environment = %config.environment,
            restaurant_id = %config.restaurant_id,
            timezone = %config.timezone,
            "Server state initialized"
        );
        Self {
            config: Arc::new(config),
            jwt,
            stores,
            guard,
        }
    }

    /// Config from the environment, then state
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(Config::from_env()?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn restaurant_id(&self) -> &str {
        &self.config.restaurant_id
    }

    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn guard(&self) -> &AuthGuard {
        &self.guard
    }

    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self)
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self)
    }

    pub fn staff(&self) -> StaffService {
        StaffService::new(self)
    }

    pub fn tables(&self) -> TableService {
        TableService::new(self)
    }

    pub fn menu(&self) -> MenuService {
        MenuService::new(self)
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self)
    }

    pub fn restaurant(&self) -> RestaurantService {
        RestaurantService::new(self)
    }

    pub fn settings(&self) -> SettingsService {
        SettingsService::new(self)
    }
}
