//! Menu service

use serde::Serialize;
use shared::models::{MenuCategory, MenuCategoryCreate, MenuItem, MenuItemUpdate};
use shared::permissions::Permission;

use crate::audit_log;
use crate::auth::AuthGuard;
use crate::core::ServerState;
use crate::store::Stores;
use crate::utils::validation::{
    MAX_AMOUNT, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, require_non_negative,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Categories in display order plus every item
#[derive(Debug, Clone, Serialize)]
pub struct MenuSnapshot {
    pub categories: Vec<MenuCategory>,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone)]
pub struct MenuService {
    guard: AuthGuard,
    stores: Stores,
}

impl MenuService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            guard: state.guard().clone(),
            stores: state.stores().clone(),
        }
    }

    /// Any signed-in staff member may read the menu
    pub fn list(&self, authorization: Option<&str>) -> AppResult<MenuSnapshot> {
        self.guard.authenticate(authorization)?;
        Ok(MenuSnapshot {
            categories: self.stores.categories_snapshot(),
            items: self.stores.menu_items_snapshot(),
        })
    }

    /// New categories are appended after the existing ones
    pub fn create_category(
        &self,
        authorization: Option<&str>,
        payload: MenuCategoryCreate,
    ) -> AppResult<MenuCategory> {
        let user = self.guard.authorize(authorization, Permission::ManageMenu)?;
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&payload.id, "id", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&payload.icon, "icon", MAX_SHORT_TEXT_LEN)?;

        if let Some(id) = &payload.id
            && self.stores.categories.contains_key(id)
        {
            return Err(AppError::already_exists(format!("Category {id}")));
        }

        let sort_order = self
            .stores
            .categories
            .iter()
            .map(|c| c.sort_order)
            .max()
            .map_or(0, |max| max + 1);
        let category = MenuCategory::create(payload, sort_order);
        self.stores
            .categories
            .insert(category.id.clone(), category.clone());
        audit_log!(
            user.staff_id.as_str(),
            "menu.create_category",
            category.id.as_str()
        );
        Ok(category)
    }

    pub fn create_item(&self, authorization: Option<&str>, item: MenuItem) -> AppResult<MenuItem> {
        let user = self.guard.authorize(authorization, Permission::ManageMenu)?;
        validate_item(&item)?;
        self.require_category(&item.category_id)?;
        if self.stores.menu_items.contains_key(&item.id) {
            return Err(AppError::already_exists(format!("Menu item {}", item.id)));
        }

        self.stores.menu_items.insert(item.id.clone(), item.clone());
        audit_log!(user.staff_id.as_str(), "menu.create_item", item.id.as_str());
        Ok(item)
    }

    /// Partial update, including 86'ing an item and bringing it back
    pub fn update_item(
        &self,
        authorization: Option<&str>,
        id: &str,
        update: MenuItemUpdate,
    ) -> AppResult<MenuItem> {
        let user = self.guard.authorize(authorization, Permission::ManageMenu)?;
        if let Some(category_id) = &update.category_id {
            self.require_category(category_id)?;
        }

        let item = {
            let mut entry = self.stores.menu_items.get_mut(id).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::MenuItemNotFound,
                    format!("Menu item {id} not found"),
                )
            })?;
            let mut updated = entry.value().clone();
            updated.apply_update(update);
            validate_item(&updated)?;
            *entry = updated.clone();
            updated
        };

        audit_log!(user.staff_id.as_str(), "menu.update_item", id);
        Ok(item)
    }

    fn require_category(&self, id: &str) -> AppResult<()> {
        if self.stores.categories.contains_key(id) {
            Ok(())
        } else {
            Err(AppError::with_message(
                ErrorCode::CategoryNotFound,
                format!("Category {id} not found"),
            ))
        }
    }
}

fn validate_item(item: &MenuItem) -> AppResult<()> {
    validate_required_text(&item.id, "id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&item.name, "name", MAX_NAME_LEN)?;
    if item.description.len() > MAX_NOTE_LEN {
        return Err(AppError::validation(format!(
            "description is too long (max {MAX_NOTE_LEN})"
        )));
    }
    if item.prices.is_empty() {
        return Err(AppError::validation("prices must not be empty"));
    }
    for price in &item.prices {
        validate_required_text(&price.size, "size", MAX_SHORT_TEXT_LEN)?;
        require_non_negative(price.amount, "amount", MAX_AMOUNT)?;
    }
    require_non_negative(item.tax_rate, "taxRate", 1.0)?;
    for ingredient in &item.recipe {
        require_non_negative(ingredient.quantity, "quantity", MAX_AMOUNT)?;
    }
    Ok(())
}
