//! Restaurant profile service

use chrono_tz::Tz;
use shared::models::{Restaurant, RestaurantUpdate};
use shared::permissions::Permission;

use crate::audit_log;
use crate::auth::AuthGuard;
use crate::core::ServerState;
use crate::store::Stores;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct RestaurantService {
    guard: AuthGuard,
    stores: Stores,
}

impl RestaurantService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            guard: state.guard().clone(),
            stores: state.stores().clone(),
        }
    }

    /// The caller's restaurant; any signed-in staff member may read it
    pub fn get(&self, authorization: Option<&str>) -> AppResult<Restaurant> {
        let user = self.guard.authenticate(authorization)?;
        self.stores
            .restaurants
            .get(&user.restaurant_id)
            .map(|r| r.value().clone())
            .ok_or_else(|| restaurant_not_found(&user.restaurant_id))
    }

    pub fn update(
        &self,
        authorization: Option<&str>,
        update: RestaurantUpdate,
    ) -> AppResult<Restaurant> {
        let user = self
            .guard
            .authorize(authorization, Permission::ManageRestaurant)?;
        validate_update(&update)?;

        let restaurant = {
            let mut entry = self
                .stores
                .restaurants
                .get_mut(&user.restaurant_id)
                .ok_or_else(|| restaurant_not_found(&user.restaurant_id))?;
            entry.apply_update(update);
            entry.value().clone()
        };

        audit_log!(
            user.staff_id.as_str(),
            "restaurant.update",
            restaurant.id.as_str()
        );
        Ok(restaurant)
    }
}

fn restaurant_not_found(id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::RestaurantNotFound,
        format!("Restaurant {id} not found"),
    )
}

fn validate_update(update: &RestaurantUpdate) -> AppResult<()> {
    if update.is_empty() {
        return Err(AppError::validation("Update contains no fields"));
    }
    if let Some(name) = &update.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(timezone) = &update.timezone {
        validate_required_text(timezone, "timezone", MAX_SHORT_TEXT_LEN)?;
        if timezone.parse::<Tz>().is_err() {
            return Err(AppError::validation(format!(
                "timezone is not an IANA zone: {timezone}"
            ))
            .with_detail("field", "timezone"));
        }
    }
    if let Some(currency) = &update.currency {
        validate_required_text(currency, "currency", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(email) = &update.email {
        validate_email(email, "email")?;
    }
    if let Some(phone) = &update.phone {
        validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(address) = &update.address {
        validate_required_text(address, "address", MAX_NOTE_LEN)?;
    }
    Ok(())
}
