//! Dashboard and reports
//!
//! Thin wrappers over `shared::analytics`: take a snapshot of the stores,
//! hand it to the reducers, return what they derive. Nothing is cached.
//!
//! Business days follow the restaurant record's time zone, falling back to
//! the configured one.

use chrono_tz::Tz;
use shared::analytics::{DashboardInput, DashboardMetrics, SalesReport, TimeRange, sales_report};
use shared::permissions::Permission;
use shared::util::now_millis;

use crate::auth::AuthGuard;
use crate::core::ServerState;
use crate::store::Stores;
use crate::utils::AppResult;

#[derive(Debug, Clone)]
pub struct DashboardService {
    guard: AuthGuard,
    stores: Stores,
    timezone: Tz,
}

impl DashboardService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            guard: state.guard().clone(),
            stores: state.stores().clone(),
            timezone: state.timezone(),
        }
    }

    pub fn metrics(
        &self,
        authorization: Option<&str>,
        range: TimeRange,
    ) -> AppResult<DashboardMetrics> {
        self.metrics_at(authorization, range, now_millis())
    }

    /// Metrics as of `now` (epoch millis)
    pub fn metrics_at(
        &self,
        authorization: Option<&str>,
        range: TimeRange,
        now: i64,
    ) -> AppResult<DashboardMetrics> {
        let user = self.guard.authorize(authorization, Permission::ViewDashboard)?;
        range.validate()?;

        let orders = self.stores.orders_snapshot();
        let tables = self.stores.tables_snapshot();
        let inventory = self.stores.inventory_snapshot();
        let staff = self.stores.staff_of(&user.restaurant_id);

        let metrics = DashboardMetrics::compute(&DashboardInput {
            orders: &orders,
            tables: &tables,
            inventory: &inventory,
            staff: &staff,
            range,
            now,
            tz: self.zone(&user.restaurant_id),
        });
        tracing::debug!(
            orders = metrics.order_count,
            revenue = metrics.total_revenue,
            "Dashboard metrics computed"
        );
        Ok(metrics)
    }

    pub fn sales_report(
        &self,
        authorization: Option<&str>,
        range: TimeRange,
    ) -> AppResult<SalesReport> {
        self.sales_report_at(authorization, range, now_millis())
    }

    /// Category mix and totals for orders inside the range
    pub fn sales_report_at(
        &self,
        authorization: Option<&str>,
        range: TimeRange,
        now: i64,
    ) -> AppResult<SalesReport> {
        let user = self.guard.authorize(authorization, Permission::ViewReports)?;
        range.validate()?;

        let orders = range
            .window(now, self.zone(&user.restaurant_id))
            .select(&self.stores.orders_snapshot());
        Ok(sales_report(
            &orders,
            &self.stores.menu_items_snapshot(),
            &self.stores.categories_snapshot(),
        ))
    }

    fn zone(&self, restaurant_id: &str) -> Tz {
        self.stores
            .restaurants
            .get(restaurant_id)
            .and_then(|r| r.zone())
            .unwrap_or(self.timezone)
    }
}
