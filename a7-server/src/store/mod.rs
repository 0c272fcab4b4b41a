//! In-memory stores
//!
//! One `DashMap` per collection, keyed by id. Writes are last-write-wins;
//! there are no version checks.

use std::sync::Arc;

use dashmap::DashMap;
use shared::inventory::InventoryItem;
use shared::models::{
    DiningTable, MenuCategory, MenuItem, Order, Restaurant, StaffMember, SystemSettings,
};

pub type Collection<T> = Arc<DashMap<String, T>>;

/// All collections of one restaurant. Cloning shares the maps.
///
/// `staff` may also hold members of other restaurants (the guard refuses
/// them); every other collection belongs to the served restaurant.
#[derive(Debug, Clone, Default)]
pub struct Stores {
    pub inventory: Collection<InventoryItem>,
    pub orders: Collection<Order>,
    pub tables: Collection<DiningTable>,
    pub staff: Collection<StaffMember>,
    pub menu_items: Collection<MenuItem>,
    pub categories: Collection<MenuCategory>,
    /// Keyed by restaurant id
    pub restaurants: Collection<Restaurant>,
    /// Keyed by restaurant id
    pub settings: Collection<SystemSettings>,
}

/// Clone every value out of a collection
pub fn snapshot<T: Clone>(collection: &DashMap<String, T>) -> Vec<T> {
    collection.iter().map(|entry| entry.value().clone()).collect()
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inventory_snapshot(&self) -> Vec<InventoryItem> {
        let mut items = snapshot(&self.inventory);
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        items
    }

    /// Newest first
    pub fn orders_snapshot(&self) -> Vec<Order> {
        let mut orders = snapshot(&self.orders);
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        orders
    }

    pub fn tables_snapshot(&self) -> Vec<DiningTable> {
        let mut tables = snapshot(&self.tables);
        tables.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
        tables
    }

    pub fn staff_snapshot(&self) -> Vec<StaffMember> {
        let mut staff = snapshot(&self.staff);
        staff.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        staff
    }

    /// Members of one restaurant, by name
    pub fn staff_of(&self, restaurant_id: &str) -> Vec<StaffMember> {
        let mut staff = self.staff_snapshot();
        staff.retain(|m| m.restaurant_id == restaurant_id);
        staff
    }

    /// In display order
    pub fn categories_snapshot(&self) -> Vec<MenuCategory> {
        let mut categories = snapshot(&self.categories);
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.id.cmp(&b.id)));
        categories
    }

    pub fn menu_items_snapshot(&self) -> Vec<MenuItem> {
        let mut items = snapshot(&self.menu_items);
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        items
    }
}
