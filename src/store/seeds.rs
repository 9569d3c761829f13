//! Built-in starting data, used when no config file overrides it.

use rust_decimal::Decimal;

use crate::models::Category;

pub(crate) fn total_budget() -> Decimal {
    Decimal::from(5000)
}

pub(crate) fn categories() -> Vec<Category> {
    vec![
        Category::with_spent("Food".into(), Decimal::from(1000), Decimal::from(800)),
        Category::with_spent("Transport".into(), Decimal::from(500), Decimal::from(300)),
        Category::with_spent(
            "Entertainment".into(),
            Decimal::from(1500),
            Decimal::from(1000),
        ),
    ]
}
