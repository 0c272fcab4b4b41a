//! Menu Model

use crate::util::snowflake_id;
use serde::{Deserialize, Serialize};

/// Menu category (Burgers, Drinks, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Display and report order
    #[serde(default)]
    pub sort_order: i32,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategoryCreate {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl MenuCategory {
    /// New categories go to the end
    pub fn create(payload: MenuCategoryCreate, sort_order: i32) -> Self {
        Self {
            id: payload
                .id
                .unwrap_or_else(|| format!("cat-{}", snowflake_id())),
            name: payload.name,
            icon: payload.icon,
            sort_order,
        }
    }
}

/// One size/price point of a menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuPrice {
    pub size: String,
    pub amount: f64,
}

/// Inventory consumed per sold unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub inventory_item_id: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub prices: Vec<MenuPrice>,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default = "default_true")]
    pub active: bool,
    /// Temporarily unavailable ("86'd")
    #[serde(default, rename = "is86d")]
    pub is_86d: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipe: Vec<RecipeIngredient>,
}

fn default_true() -> bool {
    true
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub prices: Option<Vec<MenuPrice>>,
    pub tax_rate: Option<f64>,
    pub active: Option<bool>,
    #[serde(rename = "is86d")]
    pub is_86d: Option<bool>,
    pub recipe: Option<Vec<RecipeIngredient>>,
}

impl MenuItem {
    /// First listed price, used when no size is chosen
    pub fn base_price(&self) -> Option<f64> {
        self.prices.first().map(|p| p.amount)
    }

    pub fn price_for(&self, size: &str) -> Option<f64> {
        self.prices.iter().find(|p| p.size == size).map(|p| p.amount)
    }

    /// Orderable right now
    pub fn is_available(&self) -> bool {
        self.active && !self.is_86d
    }

    pub fn apply_update(&mut self, update: MenuItemUpdate) {
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(prices) = update.prices {
            self.prices = prices;
        }
        if let Some(tax_rate) = update.tax_rate {
            self.tax_rate = tax_rate;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        if let Some(is_86d) = update.is_86d {
            self.is_86d = is_86d;
        }
        if let Some(recipe) = update.recipe {
            self.recipe = recipe;
        }
    }
}
