//! System Settings Model

use crate::util::snowflake_id;
use serde::{Deserialize, Serialize};

/// Per-restaurant system settings. One record per restaurant, created with
/// defaults the first time anything is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub id: String,
    pub restaurant_id: String,
    /// Fraction, `0.08` is 8%
    pub tax_rate: f64,
    pub currency_symbol: String,
    pub auto_clock_out: bool,
    pub pin_length: u8,
    pub primary_color: String,
    pub enable_kitchen_audio: bool,
    /// Seconds between kitchen display refreshes
    pub kds_refresh_rate: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Update settings payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub tax_rate: Option<f64>,
    pub currency_symbol: Option<String>,
    pub auto_clock_out: Option<bool>,
    pub pin_length: Option<u8>,
    pub primary_color: Option<String>,
    pub enable_kitchen_audio: Option<bool>,
    pub kds_refresh_rate: Option<u32>,
}

impl SystemSettings {
    pub const DEFAULT_TAX_RATE: f64 = 0.08;
    pub const DEFAULT_PIN_LENGTH: u8 = 4;
    pub const DEFAULT_KDS_REFRESH_RATE: u32 = 5;

    pub fn defaults(restaurant_id: impl Into<String>, now: i64) -> Self {
        Self {
            id: format!("settings-{}", snowflake_id()),
            restaurant_id: restaurant_id.into(),
            tax_rate: Self::DEFAULT_TAX_RATE,
            currency_symbol: "$".to_string(),
            auto_clock_out: true,
            pin_length: Self::DEFAULT_PIN_LENGTH,
            primary_color: "#E63946".to_string(),
            enable_kitchen_audio: true,
            kds_refresh_rate: Self::DEFAULT_KDS_REFRESH_RATE,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: SettingsUpdate, now: i64) {
        if let Some(tax_rate) = update.tax_rate {
            self.tax_rate = tax_rate;
        }
        if let Some(symbol) = update.currency_symbol {
            self.currency_symbol = symbol;
        }
        if let Some(auto_clock_out) = update.auto_clock_out {
            self.auto_clock_out = auto_clock_out;
        }
        if let Some(pin_length) = update.pin_length {
            self.pin_length = pin_length;
        }
        if let Some(color) = update.primary_color {
            self.primary_color = color;
        }
        if let Some(audio) = update.enable_kitchen_audio {
            self.enable_kitchen_audio = audio;
        }
        if let Some(rate) = update.kds_refresh_rate {
            self.kds_refresh_rate = rate;
        }
        self.updated_at = now;
    }
}
