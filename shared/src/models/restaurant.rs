//! Restaurant Model

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Restaurant profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    /// IANA zone name; business days for reports start at local midnight
    pub timezone: String,
    /// ISO 4217 code
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Update restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub timezone: Option<String>,
    pub currency: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl RestaurantUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.timezone.is_none()
            && self.currency.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

impl Restaurant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, timezone: Tz) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            timezone: timezone.name().to_string(),
            currency: "USD".to_string(),
            email: None,
            phone: None,
            address: None,
        }
    }

    /// Parsed zone; `None` for a name chrono-tz does not know
    pub fn zone(&self) -> Option<Tz> {
        self.timezone.parse().ok()
    }

    pub fn apply_update(&mut self, update: RestaurantUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(timezone) = update.timezone {
            self.timezone = timezone;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
    }
}
