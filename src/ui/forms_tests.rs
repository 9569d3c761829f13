#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::app::{App, FormKind, InputMode, PendingAction};
use super::forms;
use crate::store::BudgetStore;
use crate::validate::ValidationError;

fn setup() -> (App, BudgetStore) {
    let mut store = BudgetStore::seeded();
    let app = App::new(&store);
    app.watch(&mut store);
    (app, store)
}

fn fill(app: &mut App, first: &str, second: &str) {
    let form = app.form.as_mut().unwrap();
    form.fields[0].value = first.to_string();
    form.fields[1].value = second.to_string();
}

// ── Add category ──────────────────────────────────────────────

#[test]
fn test_add_category_valid() {
    let (mut app, mut store) = setup();
    forms::open_new_category(&mut app);
    assert_eq!(app.input_mode, InputMode::Editing);

    fill(&mut app, "  Health ", "300");
    forms::submit(&mut app, &mut store).unwrap();

    assert!(app.form.is_none());
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(store.len(), 4);
    let added = store.get(3).unwrap();
    assert_eq!(added.name, "Health");
    assert_eq!(added.allocated, dec!(300));
    assert_eq!(added.spent, dec!(0));
    assert_eq!(app.category_index, 3);
    assert_eq!(app.insights.total_allocated, dec!(3300));
    assert!(app.status_message.contains("Added category: Health"));
}

#[test]
fn test_add_category_blank_name_shows_inline_error() {
    let (mut app, mut store) = setup();
    forms::open_new_category(&mut app);
    fill(&mut app, "   ", "300");
    forms::submit(&mut app, &mut store).unwrap();

    assert_eq!(store.len(), 3);
    let form = app.form.as_ref().unwrap();
    assert_eq!(form.fields[0].error, Some(ValidationError::EmptyName));
    assert_eq!(form.fields[1].error, None);
    assert_eq!(form.focus, 0);
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.status_message, "Fix the highlighted fields");
}

#[test]
fn test_add_category_both_fields_invalid() {
    let (mut app, mut store) = setup();
    forms::open_new_category(&mut app);
    fill(&mut app, "", "abc");
    forms::submit(&mut app, &mut store).unwrap();

    let form = app.form.as_ref().unwrap();
    assert_eq!(form.fields[0].error, Some(ValidationError::EmptyName));
    assert_eq!(form.fields[1].error, Some(ValidationError::InvalidAmount));
    assert_eq!(store.len(), 3);
}

#[test]
fn test_invalid_amount_moves_focus_to_amount() {
    let (mut app, mut store) = setup();
    forms::open_new_category(&mut app);
    fill(&mut app, "Health", "0");
    forms::submit(&mut app, &mut store).unwrap();

    let form = app.form.as_ref().unwrap();
    assert_eq!(form.focus, 1);
    assert_eq!(form.fields[1].error, Some(ValidationError::InvalidAmount));
}

#[test]
fn test_typing_clears_field_error() {
    let (mut app, mut store) = setup();
    forms::open_new_category(&mut app);
    forms::submit(&mut app, &mut store).unwrap();
    let form = app.form.as_mut().unwrap();
    assert!(form.fields[0].error.is_some());

    form.push_char('F');
    assert!(form.fields[0].error.is_none());
    assert_eq!(form.fields[0].value, "F");
}

// ── Edit category ─────────────────────────────────────────────

#[test]
fn test_edit_form_is_prefilled() {
    let (mut app, store) = setup();
    app.select(1);
    forms::open_edit_category(&mut app, &store);

    let form = app.form.as_ref().unwrap();
    assert_eq!(form.kind, FormKind::EditCategory { index: 1 });
    assert_eq!(form.fields[0].value, "Transport");
    assert_eq!(form.fields[1].value, "500");
}

#[test]
fn test_edit_category_keeps_spent() {
    let (mut app, mut store) = setup();
    forms::open_edit_category(&mut app, &store);
    fill(&mut app, "Groceries", "1200");
    forms::submit(&mut app, &mut store).unwrap();

    let cat = store.get(0).unwrap();
    assert_eq!(cat.name, "Groceries");
    assert_eq!(cat.allocated, dec!(1200));
    assert_eq!(cat.spent, dec!(800));
    assert_eq!(app.status_message, "Updated category: Groceries");
}

#[test]
fn test_edit_with_empty_store_reports_no_selection() {
    let mut store = BudgetStore::new(dec!(100));
    let mut app = App::new(&store);
    app.watch(&mut store);
    forms::open_edit_category(&mut app, &store);
    assert!(app.form.is_none());
    assert_eq!(app.status_message, "No category selected");
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_transaction_within_budget() {
    let (mut app, mut store) = setup();
    forms::open_transaction(&mut app, &store);
    fill(&mut app, "Groceries run", "150");
    forms::submit(&mut app, &mut store).unwrap();

    assert_eq!(store.get(0).unwrap().spent, dec!(950));
    assert_eq!(app.insights.total_spent, dec!(2250));
    assert_eq!(
        app.status_message,
        "Recorded 'Groceries run' ($150.00) in Food"
    );
}

#[test]
fn test_transaction_exactly_remaining_is_allowed() {
    let (mut app, mut store) = setup();
    forms::open_transaction(&mut app, &store);
    fill(&mut app, "Dinner", "200");
    forms::submit(&mut app, &mut store).unwrap();

    let food = store.get(0).unwrap();
    assert_eq!(food.spent, dec!(1000));
    assert_eq!(food.remaining(), dec!(0));
}

#[test]
fn test_transaction_over_remaining_is_rejected() {
    let (mut app, mut store) = setup();
    forms::open_transaction(&mut app, &store);
    fill(&mut app, "Dinner", "250");
    forms::submit(&mut app, &mut store).unwrap();

    assert_eq!(store.get(0).unwrap().spent, dec!(800));
    let form = app.form.as_ref().unwrap();
    assert_eq!(
        form.fields[1].error,
        Some(ValidationError::InsufficientBudget {
            remaining: dec!(200)
        })
    );
    assert_eq!(form.focus, 1);
}

#[test]
fn test_transaction_requires_description() {
    let (mut app, mut store) = setup();
    forms::open_transaction(&mut app, &store);
    fill(&mut app, " ", "10");
    forms::submit(&mut app, &mut store).unwrap();

    let form = app.form.as_ref().unwrap();
    assert_eq!(form.fields[0].error, Some(ValidationError::EmptyDescription));
    assert_eq!(store.get(0).unwrap().spent, dec!(800));
}

// ── Deletion ──────────────────────────────────────────────────

#[test]
fn test_request_delete_enters_confirm_mode() {
    let (mut app, store) = setup();
    app.select(2);
    forms::request_delete(&mut app, &store);

    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(app.confirm_message, "Delete category 'Entertainment'?");
    assert_eq!(
        app.pending_action,
        Some(PendingAction::DeleteCategory {
            index: 2,
            name: "Entertainment".into()
        })
    );
}

#[test]
fn test_confirm_delete_last_row_clamps_selection() {
    let (mut app, mut store) = setup();
    app.select(2);
    forms::request_delete(&mut app, &store);
    forms::confirm(&mut app, &mut store);

    assert_eq!(store.len(), 2);
    assert_eq!(app.category_index, 1);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
    assert_eq!(app.insights.rows.len(), 2);
    assert_eq!(app.status_message, "Deleted category: Entertainment");
}

#[test]
fn test_cancel_delete_keeps_category() {
    let (mut app, mut store) = setup();
    forms::request_delete(&mut app, &store);
    forms::cancel_confirm(&mut app);

    assert_eq!(store.len(), 3);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "Cancelled");
}

#[test]
fn test_confirm_skips_when_category_changed() {
    let (mut app, mut store) = setup();
    forms::request_delete(&mut app, &store);
    store.edit_category(0, "Groceries", dec!(1000));
    forms::confirm(&mut app, &mut store);

    assert_eq!(store.len(), 3);
    assert_eq!(app.status_message, "Category 'Food' no longer exists");
}

#[test]
fn test_delete_only_category_leaves_empty_store() {
    let mut store = BudgetStore::new(dec!(100));
    store.add_category("Only", dec!(50));
    let mut app = App::new(&store);
    app.watch(&mut store);

    forms::request_delete(&mut app, &store);
    forms::confirm(&mut app, &mut store);

    assert!(store.is_empty());
    assert_eq!(app.category_index, 0);
    assert!(app.selected_category(&store).is_none());

    forms::request_delete(&mut app, &store);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "No categories to delete");
}

// ── Listener wiring ───────────────────────────────────────────

#[test]
fn test_store_mutation_marks_app_stale() {
    let (mut app, mut store) = setup();
    assert!(!app.is_stale());
    store.add_transaction(1, "bus", dec!(20));
    assert!(app.is_stale());

    app.sync(&store);
    assert!(!app.is_stale());
    assert_eq!(app.insights.total_spent, dec!(2120));
}
