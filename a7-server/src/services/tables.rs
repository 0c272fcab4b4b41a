//! Floor plan service

use std::collections::HashSet;

use shared::models::DiningTable;
use shared::permissions::Permission;

use crate::audit_log;
use crate::auth::AuthGuard;
use crate::core::ServerState;
use crate::store::Stores;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct TableService {
    guard: AuthGuard,
    stores: Stores,
}

impl TableService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            guard: state.guard().clone(),
            stores: state.stores().clone(),
        }
    }

    /// Any signed-in staff member may read the floor plan
    pub fn list(&self, authorization: Option<&str>) -> AppResult<Vec<DiningTable>> {
        self.guard.authenticate(authorization)?;
        Ok(self.stores.tables_snapshot())
    }

    /// Replace the whole floor plan
    pub fn replace_all(
        &self,
        authorization: Option<&str>,
        tables: Vec<DiningTable>,
    ) -> AppResult<Vec<DiningTable>> {
        let user = self.guard.authorize(authorization, Permission::ManageTables)?;

        let mut seen = HashSet::new();
        for table in &tables {
            validate_required_text(&table.id, "id", MAX_SHORT_TEXT_LEN)?;
            validate_required_text(&table.label, "label", MAX_NAME_LEN)?;
            if table.capacity == 0 {
                return Err(AppError::validation("capacity must be at least 1"));
            }
            if !seen.insert(table.id.as_str()) {
                return Err(AppError::already_exists(format!("Table {}", table.id)));
            }
        }

        self.stores.tables.clear();
        for table in tables {
            self.stores.tables.insert(table.id.clone(), table);
        }

        let count = self.stores.tables.len();
        audit_log!(
            user.staff_id.as_str(),
            "tables.replace",
            "tables",
            format!("count={count}").as_str()
        );
        Ok(self.stores.tables_snapshot())
    }

    /// Bus a table back to vacant
    pub fn reset(&self, authorization: Option<&str>, id: &str) -> AppResult<DiningTable> {
        let user = self.guard.authorize(authorization, Permission::ManageTables)?;
        let table = {
            let mut table = self.stores.tables.get_mut(id).ok_or_else(|| {
                AppError::with_message(ErrorCode::TableNotFound, format!("Table {id} not found"))
            })?;
            table.reset();
            table.value().clone()
        };
        audit_log!(user.staff_id.as_str(), "tables.reset", id);
        Ok(table)
    }
}
