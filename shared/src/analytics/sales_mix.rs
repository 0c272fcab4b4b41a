//! Category sales mix

use super::money::{percent_share, to_decimal, to_f64};
use crate::models::{MenuCategory, MenuItem, Order};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Sales attributed to one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub category_id: String,
    pub name: String,
    /// Sum of `qty * unit_price`
    pub sales: f64,
    pub qty: u64,
    /// Rounded percentage of total sales
    pub share: u32,
}

/// Sales report over a set of orders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub categories: Vec<CategorySales>,
    pub total_items: u64,
    pub total_sales: f64,
    pub order_count: usize,
    /// Attributed sales per order
    pub average_order_value: f64,
}

struct Accumulated {
    sales: Vec<(Decimal, u64)>,
    total_sales: Decimal,
    total_items: u64,
}

/// Resolve every line to its category and accumulate. Lines whose menu item
/// or category is unknown do not count anywhere.
fn accumulate(orders: &[Order], items: &[MenuItem], categories: &[MenuCategory]) -> Accumulated {
    let category_index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.as_str(), i))
        .collect();
    let item_category: HashMap<&str, &str> = items
        .iter()
        .map(|m| (m.id.as_str(), m.category_id.as_str()))
        .collect();

    let mut acc = Accumulated {
        sales: vec![(Decimal::ZERO, 0); categories.len()],
        total_sales: Decimal::ZERO,
        total_items: 0,
    };

    for line in orders.iter().flat_map(|o| o.items.iter()) {
        let Some(idx) = item_category
            .get(line.menu_item_id.as_str())
            .and_then(|cat| category_index.get(cat))
        else {
            continue;
        };
        let line_sales = to_decimal(line.unit_price) * Decimal::from(line.qty);
        let slot = &mut acc.sales[*idx];
        slot.0 += line_sales;
        slot.1 = slot.1.saturating_add(u64::from(line.qty));
        acc.total_sales += line_sales;
        acc.total_items = acc.total_items.saturating_add(u64::from(line.qty));
    }
    acc
}

/// Per-category sales and share, in category order.
///
/// Categories with neither sales nor quantity are left out. Every share is
/// 0 when total sales are 0.
pub fn category_sales_mix(
    orders: &[Order],
    items: &[MenuItem],
    categories: &[MenuCategory],
) -> Vec<CategorySales> {
    let acc = accumulate(orders, items, categories);
    mix_from(&acc, categories)
}

fn mix_from(acc: &Accumulated, categories: &[MenuCategory]) -> Vec<CategorySales> {
    categories
        .iter()
        .zip(acc.sales.iter())
        .filter(|(_, (sales, qty))| !sales.is_zero() || *qty > 0)
        .map(|(cat, (sales, qty))| CategorySales {
            category_id: cat.id.clone(),
            name: cat.name.clone(),
            sales: to_f64(*sales),
            qty: *qty,
            share: percent_share(*sales, acc.total_sales),
        })
        .collect()
}

pub fn sales_report(
    orders: &[Order],
    items: &[MenuItem],
    categories: &[MenuCategory],
) -> SalesReport {
    let acc = accumulate(orders, items, categories);
    let average_order_value = if orders.is_empty() {
        0.0
    } else {
        to_f64(acc.total_sales / Decimal::from(orders.len()))
    };
    SalesReport {
        categories: mix_from(&acc, categories),
        total_items: acc.total_items,
        total_sales: to_f64(acc.total_sales),
        order_count: orders.len(),
        average_order_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MenuPrice, OrderItem, OrderStatus, OrderType};

    fn category(id: &str) -> MenuCategory {
        MenuCategory {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: None,
            sort_order: 0,
        }
    }

    fn menu_item(id: &str, category_id: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            category_id: category_id.to_string(),
            name: id.to_string(),
            description: String::new(),
            prices: vec![MenuPrice {
                size: "Regular".to_string(),
                amount: 1.0,
            }],
            tax_rate: 0.0,
            active: true,
            is_86d: false,
            recipe: Vec::new(),
        }
    }

    fn line(menu_item_id: &str, qty: u32, unit_price: f64) -> OrderItem {
        OrderItem {
            id: format!("l-{menu_item_id}"),
            menu_item_id: menu_item_id.to_string(),
            name: menu_item_id.to_string(),
            qty,
            unit_price,
            modifiers: Vec::new(),
            notes: None,
        }
    }

    fn order(items: Vec<OrderItem>) -> Order {
        Order {
            id: "o".to_string(),
            order_number: "1".to_string(),
            order_type: OrderType::DineIn,
            table_id: None,
            status: OrderStatus::Paid,
            items,
            subtotal: 0.0,
            tax: 0.0,
            tip: 0.0,
            total: 0.0,
            created_at: 0,
        }
    }

    fn menu() -> (Vec<MenuItem>, Vec<MenuCategory>) {
        (
            vec![
                menu_item("burger", "mains"),
                menu_item("fries", "sides"),
                menu_item("cola", "drinks"),
            ],
            vec![category("mains"), category("sides"), category("drinks"), category("desserts")],
        )
    }

    #[test]
    fn test_mix_in_category_order_without_empty_categories() {
        let (items, cats) = menu();
        let orders = vec![
            order(vec![line("cola", 2, 2.5), line("burger", 1, 12.0)]),
            order(vec![line("fries", 2, 3.0)]),
        ];
        let mix = category_sales_mix(&orders, &items, &cats);
        let ids: Vec<_> = mix.iter().map(|c| c.category_id.as_str()).collect();
        assert_eq!(ids, vec!["mains", "sides", "drinks"]);
        assert_eq!(mix[0].sales, 12.0);
        assert_eq!(mix[2].qty, 2);
        // 12 / 23, 6 / 23, 5 / 23
        let shares: Vec<_> = mix.iter().map(|c| c.share).collect();
        assert_eq!(shares, vec![52, 26, 22]);
    }

    #[test]
    fn test_shares_sum_to_about_100() {
        let (items, cats) = menu();
        let orders = vec![order(vec![
            line("burger", 1, 1.0),
            line("fries", 1, 1.0),
            line("cola", 1, 1.0),
        ])];
        let mix = category_sales_mix(&orders, &items, &cats);
        let sum: u32 = mix.iter().map(|c| c.share).sum();
        assert_eq!(sum, 99);
        assert!(sum.abs_diff(100) <= mix.len() as u32);
    }

    #[test]
    fn test_zero_total_gives_zero_shares() {
        let (items, cats) = menu();
        let orders = vec![order(vec![line("burger", 3, 0.0), line("cola", 1, 0.0)])];
        let mix = category_sales_mix(&orders, &items, &cats);
        assert_eq!(mix.len(), 2);
        assert!(mix.iter().all(|c| c.share == 0));
    }

    #[test]
    fn test_unknown_item_or_category_is_skipped() {
        let (mut items, cats) = menu();
        items.push(menu_item("ghost", "retired"));
        let orders = vec![order(vec![
            line("burger", 1, 10.0),
            line("ghost", 5, 100.0),
            line("not-on-menu", 1, 50.0),
        ])];
        let report = sales_report(&orders, &items, &cats);
        assert_eq!(report.total_sales, 10.0);
        assert_eq!(report.total_items, 1);
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.categories[0].share, 100);
    }

    #[test]
    fn test_quantities_past_u32_do_not_overflow() {
        let (items, cats) = menu();
        let orders = vec![
            order(vec![line("burger", u32::MAX, 0.01)]),
            order(vec![line("burger", u32::MAX, 0.01)]),
        ];
        let report = sales_report(&orders, &items, &cats);
        assert_eq!(report.total_items, 2 * u64::from(u32::MAX));
        assert_eq!(report.categories[0].qty, 2 * u64::from(u32::MAX));
        assert_eq!(orders[0].item_count() + orders[1].item_count(), report.total_items);
    }

    #[test]
    fn test_empty_orders() {
        let (items, cats) = menu();
        let report = sales_report(&[], &items, &cats);
        assert!(report.categories.is_empty());
        assert_eq!(report.average_order_value, 0.0);
        assert_eq!(report.order_count, 0);
    }

    #[test]
    fn test_report_average_uses_attributed_sales() {
        let (items, cats) = menu();
        let orders = vec![
            order(vec![line("burger", 2, 10.0)]),
            order(vec![line("fries", 1, 5.0)]),
        ];
        let report = sales_report(&orders, &items, &cats);
        assert_eq!(report.total_sales, 25.0);
        assert_eq!(report.average_order_value, 12.5);
    }
}
