#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Category;

#[test]
fn test_seeded_totals() {
    let insights = Insights::compute(&BudgetStore::seeded());
    assert_eq!(insights.total_budget, dec!(5000));
    assert_eq!(insights.total_allocated, dec!(3000));
    assert_eq!(insights.total_spent, dec!(2100));
    assert_eq!(insights.total_remaining(), dec!(900));
    assert_eq!(insights.unallocated(), dec!(2000));
    assert!(insights.over_budget().is_empty());
}

#[test]
fn test_rows_follow_store_order() {
    let insights = Insights::compute(&BudgetStore::seeded());
    let names: Vec<&str> = insights.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Food", "Transport", "Entertainment"]);

    let food = &insights.rows[0];
    assert_eq!(food.remaining, dec!(200));
    assert_eq!(food.utilization, dec!(0.8));
}

#[test]
fn test_shares_sum_to_one() {
    let store = BudgetStore::with_categories(
        dec!(100),
        vec![
            Category::with_spent("A".into(), dec!(50), dec!(30)),
            Category::with_spent("B".into(), dec!(50), dec!(10)),
        ],
    );
    let insights = Insights::compute(&store);
    assert_eq!(insights.rows[0].share, dec!(0.75));
    assert_eq!(insights.rows[1].share, dec!(0.25));
    let total: Decimal = insights.rows.iter().map(|r| r.share).sum();
    assert_eq!(total, Decimal::ONE);
}

#[test]
fn test_no_spending_has_zero_shares() {
    let mut store = BudgetStore::new(dec!(1000));
    store.add_category("Health", dec!(300));
    let insights = Insights::compute(&store);
    assert_eq!(insights.total_spent, Decimal::ZERO);
    assert_eq!(insights.rows[0].share, Decimal::ZERO);
}

#[test]
fn test_empty_store() {
    let insights = Insights::compute(&BudgetStore::new(dec!(250)));
    assert!(insights.rows.is_empty());
    assert_eq!(insights.total_allocated, Decimal::ZERO);
    assert_eq!(insights.unallocated(), dec!(250));
}

#[test]
fn test_over_allocated_is_negative_unallocated() {
    let mut store = BudgetStore::new(dec!(100));
    store.add_category("Rent", dec!(150));
    assert_eq!(Insights::compute(&store).unallocated(), dec!(-50));
}

#[test]
fn test_over_budget_categories() {
    let mut store = BudgetStore::seeded();
    store.add_transaction(1, "taxi", dec!(250));
    let insights = Insights::compute(&store);
    let over: Vec<&str> = insights
        .over_budget()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(over, ["Transport"]);
    assert_eq!(insights.rows[1].remaining, dec!(-50));
}

#[test]
fn test_by_spending_orders_largest_first() {
    let insights = Insights::compute(&BudgetStore::seeded());
    let names: Vec<&str> = insights
        .by_spending()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, ["Entertainment", "Food", "Transport"]);
}

#[test]
fn test_recompute_after_mutation() {
    let mut store = BudgetStore::seeded();
    let before = Insights::compute(&store);
    store.add_transaction(0, "coffee", dec!(50));
    let after = Insights::compute(&store);
    assert_eq!(after.total_spent - before.total_spent, dec!(50));
    assert_ne!(before, after);
}

#[test]
fn test_huge_allocations_saturate_totals() {
    let store = BudgetStore::with_categories(
        dec!(100),
        vec![
            Category::new("A".into(), Decimal::MAX),
            Category::with_spent("B".into(), Decimal::MAX, Decimal::MAX),
        ],
    );
    let insights = Insights::compute(&store);
    assert_eq!(insights.total_allocated, Decimal::MAX);
    assert_eq!(insights.total_spent, Decimal::MAX);
    assert!(insights.unallocated() < Decimal::ZERO);
    assert_eq!(insights.total_remaining(), Decimal::ZERO);
    assert_eq!(insights.rows[1].share, Decimal::ONE);
}

#[test]
fn test_tiny_allocation_saturates_utilization() {
    let tiny = Decimal::new(1, 28);
    let store = BudgetStore::with_categories(
        dec!(5000),
        vec![Category::with_spent("Food".into(), tiny, dec!(800))],
    );
    let insights = Insights::compute(&store);
    assert_eq!(insights.rows[0].utilization, Decimal::MAX);
    assert!(insights.rows[0].is_over_budget());
    assert_eq!(insights.over_budget().len(), 1);
}
