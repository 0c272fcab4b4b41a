//! Order service
//!
//! Orders drive their table: opening one seats the table, `served` and
//! `paid` move it along (see [`DiningTable::follow_order`]).

use shared::models::{DiningTable, Order, OrderCreate, OrderStatus};
use shared::permissions::Permission;
use shared::util::now_millis;

use crate::audit_log;
use crate::auth::AuthGuard;
use crate::core::ServerState;
use crate::store::Stores;
use crate::utils::validation::{
    MAX_AMOUNT, MAX_ITEM_QTY, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, require_bounded,
    require_non_negative, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct OrderService {
    guard: AuthGuard,
    stores: Stores,
}

impl OrderService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            guard: state.guard().clone(),
            stores: state.stores().clone(),
        }
    }

    /// All orders, newest first
    pub fn list(&self, authorization: Option<&str>) -> AppResult<Vec<Order>> {
        self.guard.authorize(authorization, Permission::ViewOrders)?;
        Ok(self.stores.orders_snapshot())
    }

    pub fn get(&self, authorization: Option<&str>, id: &str) -> AppResult<Order> {
        self.guard.authorize(authorization, Permission::ViewOrders)?;
        self.stores
            .orders
            .get(id)
            .map(|o| o.value().clone())
            .ok_or_else(|| order_not_found(id))
    }

    /// Open an order. With a table id the table must exist; it is seated
    /// and linked to the new order.
    pub fn create(&self, authorization: Option<&str>, payload: OrderCreate) -> AppResult<Order> {
        let user = self.guard.authorize(authorization, Permission::CreateOrder)?;
        validate_create(&payload)?;
        self.require_available(&payload)?;

        if let Some(id) = &payload.id
            && self.stores.orders.contains_key(id)
        {
            return Err(AppError::already_exists(format!("Order {id}")));
        }

        let order = Order::create(payload, now_millis());

        // Table first so a missing table leaves no orphan order behind
        if let Some(table_id) = &order.table_id {
            let mut table = self
                .stores
                .tables
                .get_mut(table_id)
                .ok_or_else(|| table_not_found(table_id))?;
            table.seat(order.id.clone());
            table.follow_order(order.status);
        }
        self.stores.orders.insert(order.id.clone(), order.clone());

        audit_log!(
            user.staff_id.as_str(),
            "order.create",
            order.id.as_str(),
            order.order_number.as_str()
        );
        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            table_id = ?order.table_id,
            items = order.item_count(),
            "Order created"
        );
        Ok(order)
    }

    /// Move an order forward; the table follows
    pub fn update_status(
        &self,
        authorization: Option<&str>,
        id: &str,
        status: OrderStatus,
    ) -> AppResult<Order> {
        let user = self.guard.authorize(authorization, Permission::ManageOrders)?;
        let order = self.transition(id, status)?;
        audit_log!(
            user.staff_id.as_str(),
            "order.update_status",
            id,
            status.as_str()
        );
        Ok(order)
    }

    /// Kitchen bump: `pending → preparing → ready`
    pub fn bump(&self, authorization: Option<&str>, id: &str) -> AppResult<Order> {
        let user = self.guard.authorize(authorization, Permission::ManageKitchen)?;
        let current = self
            .stores
            .orders
            .get(id)
            .map(|o| o.status)
            .ok_or_else(|| order_not_found(id))?;
        if !current.is_kitchen_active() {
            return Err(invalid_transition(current, current.next()));
        }
        let Some(next) = current.next() else {
            return Err(invalid_transition(current, None));
        };
        let order = self.transition(id, next)?;
        audit_log!(
            user.staff_id.as_str(),
            "order.bump",
            id,
            next.as_str()
        );
        Ok(order)
    }

    /// Pending and preparing orders, oldest first
    pub fn kitchen_queue(&self, authorization: Option<&str>) -> AppResult<Vec<Order>> {
        self.guard.authorize(authorization, Permission::ViewKitchen)?;
        let mut queue: Vec<Order> = self
            .stores
            .orders
            .iter()
            .filter(|o| o.status.is_kitchen_active())
            .map(|o| o.value().clone())
            .collect();
        queue.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(queue)
    }

    /// Lines for items on the menu must be orderable. Open items that were
    /// never on the menu pass through.
    fn require_available(&self, payload: &OrderCreate) -> AppResult<()> {
        for line in &payload.items {
            if let Some(item) = self.stores.menu_items.get(&line.menu_item_id)
                && !item.is_available()
            {
                return Err(AppError::with_message(
                    ErrorCode::MenuItemUnavailable,
                    format!("{} is unavailable", item.name),
                )
                .with_detail("menuItemId", item.id.clone()));
            }
        }
        Ok(())
    }

    fn transition(&self, id: &str, status: OrderStatus) -> AppResult<Order> {
        let order = {
            let mut order = self
                .stores
                .orders
                .get_mut(id)
                .ok_or_else(|| order_not_found(id))?;
            if !order.status.can_transition_to(status) {
                return Err(invalid_transition(order.status, Some(status)));
            }
            order.status = status;
            order.value().clone()
        };

        if let Some(table_id) = &order.table_id {
            match self.stores.tables.get_mut(table_id) {
                Some(mut table) => follow(&mut table, &order),
                None => tracing::warn!(
                    order_id = %order.id,
                    table_id = %table_id,
                    "Order table no longer exists"
                ),
            }
        }

        tracing::info!(order_id = %order.id, status = %status, "Order status updated");
        Ok(order)
    }
}

/// Only the order currently linked to the table (or none) may move it
fn follow(table: &mut DiningTable, order: &Order) {
    match &table.current_order_id {
        Some(current) if *current != order.id => {
            tracing::debug!(
                table_id = %table.id,
                order_id = %order.id,
                "Table is linked to another order, left unchanged"
            );
        }
        _ => table.follow_order(order.status),
    }
}

fn order_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
}

fn table_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::TableNotFound, format!("Table {id} not found"))
}

fn invalid_transition(from: OrderStatus, to: Option<OrderStatus>) -> AppError {
    let target = to.map(OrderStatus::as_str).unwrap_or("none");
    AppError::with_message(
        ErrorCode::OrderInvalidTransition,
        format!("Order cannot move from {} to {}", from.as_str(), target),
    )
    .with_detail("from", from.as_str())
    .with_detail("to", target)
}

fn validate_create(payload: &OrderCreate) -> AppResult<()> {
    validate_required_text(&payload.order_number, "orderNumber", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.id, "id", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.table_id, "tableId", MAX_SHORT_TEXT_LEN)?;
    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for item in &payload.items {
        validate_required_text(&item.menu_item_id, "menuItemId", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&item.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&item.notes, "notes", MAX_NOTE_LEN)?;
        if item.qty == 0 {
            return Err(AppError::validation("qty must be at least 1"));
        }
        if item.qty > MAX_ITEM_QTY {
            return Err(AppError::validation(format!(
                "qty exceeds maximum allowed ({MAX_ITEM_QTY}), got {}",
                item.qty
            )));
        }
        require_non_negative(item.unit_price, "unitPrice", MAX_AMOUNT)?;
        for modifier in &item.modifiers {
            validate_required_text(&modifier.name, "modifier", MAX_NAME_LEN)?;
            require_bounded(modifier.price_delta, "priceDelta", MAX_AMOUNT)?;
        }
    }
    require_non_negative(payload.subtotal, "subtotal", MAX_AMOUNT)?;
    require_non_negative(payload.tax, "tax", MAX_AMOUNT)?;
    require_non_negative(payload.tip, "tip", MAX_AMOUNT)?;
    require_non_negative(payload.total, "total", MAX_AMOUNT)?;
    Ok(())
}
