//! Per-category summary aggregation.
//!
//! Stateless: the caller hands over the category and the full product set
//! (active and inactive) and gets the derived statistics back. Inactive
//! products count toward `total_products` but are excluded from every price
//! and stock aggregate.

use rust_decimal::Decimal;

use crate::dto::CategorySummary;
use crate::entity::{Category, Product};

/// Compute the summary view for one category.
///
/// Price aggregates (`average_price`, `total_inventory_value`, `min_price`,
/// `max_price`) are coerced to zero when the category has no active
/// products. The coercion happens here, in code, not as a database default.
pub fn summarize(category: &Category, products: &[Product]) -> CategorySummary {
    let total_products = products.len() as i64;

    let mut active_products = 0i64;
    let mut out_of_stock_count = 0i64;
    let mut price_sum = Decimal::ZERO;
    let mut total_inventory_value = Decimal::ZERO;
    let mut min_price: Option<Decimal> = None;
    let mut max_price: Option<Decimal> = None;

    for product in products.iter().filter(|p| p.active) {
        active_products += 1;
        if product.stock_quantity == 0 {
            out_of_stock_count += 1;
        }
        price_sum += product.price;
        total_inventory_value += product.price * Decimal::from(product.stock_quantity);
        min_price = Some(min_price.map_or(product.price, |m| m.min(product.price)));
        max_price = Some(max_price.map_or(product.price, |m| m.max(product.price)));
    }

    let average_price = if active_products > 0 {
        price_sum / Decimal::from(active_products)
    } else {
        Decimal::ZERO
    };

    CategorySummary {
        category_id: category.id,
        category_name: category.name.clone(),
        total_products,
        active_products,
        out_of_stock_count,
        average_price,
        total_inventory_value,
        min_price: min_price.unwrap_or(Decimal::ZERO),
        max_price: max_price.unwrap_or(Decimal::ZERO),
    }
}
