//! Inventory service
//!
//! Every write builds or mutates an [`InventoryItem`], which re-derives
//! its stock status; no caller-supplied status ever reaches the store.
//! SKUs are unique within the store.

use std::collections::HashSet;

use serde::Serialize;
use shared::inventory::{
    InventoryItem, InventoryItemCreate, InventoryItemUpdate, StockAlert, stock_alerts,
};
use shared::permissions::Permission;
use shared::util::now_millis;

use crate::audit_log;
use crate::auth::AuthGuard;
use crate::core::ServerState;
use crate::store::Stores;
use crate::utils::validation::{
    MAX_AMOUNT, MAX_NAME_LEN, MAX_QUANTITY, MAX_SHORT_TEXT_LEN, require_bounded,
    require_non_negative, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Result of a single-item write
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryWrite {
    pub item: InventoryItem,
    /// Threshold crossings caused by this write
    pub alerts: Vec<StockAlert>,
}

#[derive(Debug, Clone)]
pub struct InventoryService {
    guard: AuthGuard,
    stores: Stores,
}

impl InventoryService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            guard: state.guard().clone(),
            stores: state.stores().clone(),
        }
    }

    /// All items, by name
    pub fn list(&self, authorization: Option<&str>) -> AppResult<Vec<InventoryItem>> {
        self.guard.authorize(authorization, Permission::ViewInventory)?;
        Ok(self.stores.inventory_snapshot())
    }

    pub fn create(
        &self,
        authorization: Option<&str>,
        payload: InventoryItemCreate,
    ) -> AppResult<InventoryItem> {
        let user = self
            .guard
            .authorize(authorization, Permission::ManageInventory)?;
        validate_create(&payload)?;

        if let Some(id) = &payload.id
            && self.stores.inventory.contains_key(id)
        {
            return Err(AppError::already_exists(format!("Inventory item {id}")));
        }
        self.require_unique_sku(&payload.sku, None)?;

        let item = InventoryItem::create(payload, now_millis());
        self.stores.inventory.insert(item.id.clone(), item.clone());
        audit_log!(
            user.staff_id.as_str(),
            "inventory.create",
            item.id.as_str()
        );
        Ok(item)
    }

    /// Create many items at once. Rows whose id already exists are skipped;
    /// the whole batch is validated, SKUs included, before anything is
    /// written. Returns the number created.
    pub fn bulk_create(
        &self,
        authorization: Option<&str>,
        payloads: Vec<InventoryItemCreate>,
    ) -> AppResult<usize> {
        let user = self
            .guard
            .authorize(authorization, Permission::ManageInventory)?;
        if payloads.is_empty() {
            return Ok(0);
        }
        for payload in &payloads {
            validate_create(payload)?;
        }

        let mut seen_ids = HashSet::new();
        let mut seen_skus = HashSet::new();
        let mut fresh = Vec::with_capacity(payloads.len());
        for payload in payloads {
            if let Some(id) = &payload.id
                && (self.stores.inventory.contains_key(id) || !seen_ids.insert(id.clone()))
            {
                tracing::debug!(item_id = %id, "Bulk create skipped existing item");
                continue;
            }
            if !seen_skus.insert(payload.sku.clone()) {
                return Err(sku_exists(&payload.sku));
            }
            self.require_unique_sku(&payload.sku, None)?;
            fresh.push(payload);
        }

        let now = now_millis();
        let created = fresh.len();
        for payload in fresh {
            let item = InventoryItem::create(payload, now);
            self.stores.inventory.insert(item.id.clone(), item);
        }

        audit_log!(
            user.staff_id.as_str(),
            "inventory.bulk_create",
            "inventory",
            format!("created={created}").as_str()
        );
        Ok(created)
    }

    /// Partial update; missing levels keep their stored values
    pub fn update(
        &self,
        authorization: Option<&str>,
        id: &str,
        update: InventoryItemUpdate,
    ) -> AppResult<InventoryWrite> {
        let user = self
            .guard
            .authorize(authorization, Permission::ManageInventory)?;
        validate_update(&update)?;
        if let Some(sku) = &update.sku {
            self.require_unique_sku(sku, Some(id))?;
        }

        let write = self.mutate(id, |item, now| item.apply_update(update, now))?;
        audit_log!(user.staff_id.as_str(), "inventory.update", id);
        Ok(write)
    }

    /// `on_hand += quantity`. A negative quantity records waste.
    pub fn receive_stock(
        &self,
        authorization: Option<&str>,
        id: &str,
        quantity: f64,
    ) -> AppResult<InventoryWrite> {
        let user = self
            .guard
            .authorize(authorization, Permission::ManageInventory)?;
        require_bounded(quantity, "quantity", MAX_QUANTITY)
            .map_err(|e| AppError::with_message(ErrorCode::InventoryInvalidQuantity, e.message))?;

        let write = self.mutate(id, |item, now| item.receive(quantity, now))?;
        audit_log!(
            user.staff_id.as_str(),
            "inventory.receive",
            id,
            format!("quantity={quantity}").as_str()
        );
        Ok(write)
    }

    /// `except` is the item being edited, which may keep its own SKU
    fn require_unique_sku(&self, sku: &str, except: Option<&str>) -> AppResult<()> {
        let taken = self
            .stores
            .inventory
            .iter()
            .any(|item| item.sku == sku && Some(item.id.as_str()) != except);
        if taken {
            return Err(sku_exists(sku));
        }
        Ok(())
    }

    fn mutate(
        &self,
        id: &str,
        apply: impl FnOnce(&mut InventoryItem, i64),
    ) -> AppResult<InventoryWrite> {
        let mut entry = self.stores.inventory.get_mut(id).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InventoryItemNotFound,
                format!("Inventory item {id} not found"),
            )
        })?;

        let before = entry.value().clone();
        apply(entry.value_mut(), now_millis());
        let item = entry.value().clone();
        drop(entry);

        let alerts = stock_alerts(&before, &item);
        for alert in &alerts {
            tracing::warn!(item_id = %alert.item_id, kind = ?alert.kind, "{}", alert.message());
        }
        Ok(InventoryWrite { item, alerts })
    }
}

fn sku_exists(sku: &str) -> AppError {
    AppError::with_message(
        ErrorCode::InventorySkuExists,
        format!("SKU {sku} is already in use"),
    )
    .with_detail("sku", sku)
}

fn validate_create(payload: &InventoryItemCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.id, "id", MAX_SHORT_TEXT_LEN)?;
    require_bounded(payload.on_hand, "onHand", MAX_QUANTITY)?;
    require_non_negative(payload.par_level, "parLevel", MAX_QUANTITY)?;
    require_non_negative(payload.unit_cost, "unitCost", MAX_AMOUNT)?;
    Ok(())
}

fn validate_update(update: &InventoryItemUpdate) -> AppResult<()> {
    if update.is_empty() {
        return Err(AppError::validation("Update contains no fields"));
    }
    if let Some(name) = &update.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(sku) = &update.sku {
        validate_required_text(sku, "sku", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(unit) = &update.unit {
        validate_required_text(unit, "unit", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(on_hand) = update.on_hand {
        require_bounded(on_hand, "onHand", MAX_QUANTITY)?;
    }
    if let Some(par_level) = update.par_level {
        require_non_negative(par_level, "parLevel", MAX_QUANTITY)?;
    }
    if let Some(unit_cost) = update.unit_cost {
        require_non_negative(unit_cost, "unitCost", MAX_AMOUNT)?;
    }
    Ok(())
}
