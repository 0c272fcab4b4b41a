//! System settings service
//!
//! The first save creates the record from defaults, then applies the
//! update on top.

use shared::models::{SettingsUpdate, SystemSettings};
use shared::permissions::Permission;
use shared::util::now_millis;

use crate::audit_log;
use crate::auth::AuthGuard;
use crate::core::ServerState;
use crate::store::Stores;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, require_non_negative, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Allowed PIN lengths
pub const PIN_LENGTH_RANGE: std::ops::RangeInclusive<u8> = 4..=6;

/// Allowed kitchen display refresh interval, seconds
pub const KDS_REFRESH_RANGE: std::ops::RangeInclusive<u32> = 1..=120;

#[derive(Debug, Clone)]
pub struct SettingsService {
    guard: AuthGuard,
    stores: Stores,
}

impl SettingsService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            guard: state.guard().clone(),
            stores: state.stores().clone(),
        }
    }

    pub fn get(&self, authorization: Option<&str>) -> AppResult<SystemSettings> {
        let user = self.guard.authorize(authorization, Permission::ViewSettings)?;
        self.stores
            .settings
            .get(&user.restaurant_id)
            .map(|s| s.value().clone())
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::SettingsNotFound,
                    format!("No settings saved for restaurant {}", user.restaurant_id),
                )
            })
    }

    /// Partial update. An empty update still creates the defaults.
    pub fn update(
        &self,
        authorization: Option<&str>,
        update: SettingsUpdate,
    ) -> AppResult<SystemSettings> {
        let user = self
            .guard
            .authorize(authorization, Permission::ManageSettings)?;
        validate_update(&update)?;

        let now = now_millis();
        let settings = {
            let mut entry = self
                .stores
                .settings
                .entry(user.restaurant_id.clone())
                .or_insert_with(|| {
                    tracing::info!(
                        restaurant_id = %user.restaurant_id,
                        "Settings created with defaults"
                    );
                    SystemSettings::defaults(user.restaurant_id.clone(), now)
                });
            entry.apply_update(update, now);
            entry.value().clone()
        };

        audit_log!(
            user.staff_id.as_str(),
            "settings.update",
            settings.id.as_str()
        );
        Ok(settings)
    }
}

fn validate_update(update: &SettingsUpdate) -> AppResult<()> {
    if let Some(tax_rate) = update.tax_rate {
        require_non_negative(tax_rate, "taxRate", 1.0)?;
    }
    if let Some(symbol) = &update.currency_symbol {
        validate_required_text(symbol, "currencySymbol", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(color) = &update.primary_color {
        validate_required_text(color, "primaryColor", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(pin_length) = update.pin_length
        && !PIN_LENGTH_RANGE.contains(&pin_length)
    {
        return Err(AppError::validation(format!(
            "pinLength must be between {} and {}, got {pin_length}",
            PIN_LENGTH_RANGE.start(),
            PIN_LENGTH_RANGE.end()
        )));
    }
    if let Some(rate) = update.kds_refresh_rate
        && !KDS_REFRESH_RANGE.contains(&rate)
    {
        return Err(AppError::validation(format!(
            "kdsRefreshRate must be between {} and {}, got {rate}",
            KDS_REFRESH_RANGE.start(),
            KDS_REFRESH_RANGE.end()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_update_bounds() {
        assert!(validate_update(&SettingsUpdate::default()).is_ok());

        let edges = SettingsUpdate {
            tax_rate: Some(1.0),
            pin_length: Some(6),
            kds_refresh_rate: Some(120),
            ..Default::default()
        };
        assert!(validate_update(&edges).is_ok());

        for bad in [
            SettingsUpdate {
                tax_rate: Some(1.01),
                ..Default::default()
            },
            SettingsUpdate {
                tax_rate: Some(f64::NAN),
                ..Default::default()
            },
            SettingsUpdate {
                pin_length: Some(3),
                ..Default::default()
            },
            SettingsUpdate {
                kds_refresh_rate: Some(0),
                ..Default::default()
            },
            SettingsUpdate {
                currency_symbol: Some(String::new()),
                ..Default::default()
            },
        ] {
            let err = validate_update(&bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed);
        }
    }
}
