#![allow(clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_decimal_macros::dec;

use super::handle_key;
use crate::store::BudgetStore;
use crate::ui::app::{App, InputMode, Screen};

fn setup() -> (App, BudgetStore) {
    let mut store = BudgetStore::seeded();
    let app = App::new(&store);
    app.watch(&mut store);
    (app, store)
}

fn press(code: KeyCode, app: &mut App, store: &mut BudgetStore) {
    handle_key(KeyEvent::new(code, KeyModifiers::NONE), app, store).unwrap();
}

fn type_str(s: &str, app: &mut App, store: &mut BudgetStore) {
    for c in s.chars() {
        press(KeyCode::Char(c), app, store);
    }
}

#[test]
fn test_ctrl_q_quits() {
    let (mut app, mut store) = setup();
    handle_key(
        KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        &mut app,
        &mut store,
    )
    .unwrap();
    assert!(!app.running);
}

#[test]
fn test_plain_q_does_not_quit() {
    let (mut app, mut store) = setup();
    press(KeyCode::Char('q'), &mut app, &mut store);
    assert!(app.running);
}

#[test]
fn test_navigation_stays_in_bounds() {
    let (mut app, mut store) = setup();
    press(KeyCode::Char('k'), &mut app, &mut store);
    assert_eq!(app.category_index, 0);
    press(KeyCode::Char('j'), &mut app, &mut store);
    press(KeyCode::Down, &mut app, &mut store);
    press(KeyCode::Down, &mut app, &mut store);
    assert_eq!(app.category_index, 2);
    press(KeyCode::Char('g'), &mut app, &mut store);
    assert_eq!(app.category_index, 0);
    press(KeyCode::Char('G'), &mut app, &mut store);
    assert_eq!(app.category_index, 2);
}

#[test]
fn test_tab_cycles_screens() {
    let (mut app, mut store) = setup();
    press(KeyCode::Tab, &mut app, &mut store);
    assert_eq!(app.screen, Screen::Insights);
    press(KeyCode::Tab, &mut app, &mut store);
    assert_eq!(app.screen, Screen::Dashboard);
    press(KeyCode::BackTab, &mut app, &mut store);
    assert_eq!(app.screen, Screen::Insights);
    press(KeyCode::Char('1'), &mut app, &mut store);
    assert_eq!(app.screen, Screen::Dashboard);
}

#[test]
fn test_help_closes_on_any_key() {
    let (mut app, mut store) = setup();
    press(KeyCode::Char('?'), &mut app, &mut store);
    assert!(app.show_help);
    press(KeyCode::Char('j'), &mut app, &mut store);
    assert!(!app.show_help);
    assert_eq!(app.category_index, 0);
}

#[test]
fn test_add_category_through_form() {
    let (mut app, mut store) = setup();
    press(KeyCode::Char('a'), &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Editing);
    type_str("Gifts", &mut app, &mut store);
    press(KeyCode::Tab, &mut app, &mut store);
    type_str("2500", &mut app, &mut store);
    press(KeyCode::Backspace, &mut app, &mut store);
    press(KeyCode::Enter, &mut app, &mut store);

    assert_eq!(app.input_mode, InputMode::Normal);
    let cat = store.get(3).unwrap();
    assert_eq!(cat.name, "Gifts");
    assert_eq!(cat.allocated, dec!(250));
}

#[test]
fn test_escape_cancels_form() {
    let (mut app, mut store) = setup();
    press(KeyCode::Char('t'), &mut app, &mut store);
    type_str("lunch", &mut app, &mut store);
    press(KeyCode::Esc, &mut app, &mut store);

    assert!(app.form.is_none());
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(store.get(0).unwrap().spent, dec!(800));
}

#[test]
fn test_enter_opens_transaction_form() {
    let (mut app, mut store) = setup();
    press(KeyCode::Down, &mut app, &mut store);
    press(KeyCode::Enter, &mut app, &mut store);
    type_str("bus", &mut app, &mut store);
    press(KeyCode::Down, &mut app, &mut store);
    type_str("20", &mut app, &mut store);
    press(KeyCode::Enter, &mut app, &mut store);

    assert_eq!(store.get(1).unwrap().spent, dec!(320));
    assert!(app.status_message.contains("'bus'"));
}

#[test]
fn test_delete_confirm_and_cancel() {
    let (mut app, mut store) = setup();
    press(KeyCode::Char('D'), &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Confirm);
    press(KeyCode::Char('n'), &mut app, &mut store);
    assert_eq!(store.len(), 3);

    press(KeyCode::Char('G'), &mut app, &mut store);
    press(KeyCode::Char('D'), &mut app, &mut store);
    press(KeyCode::Char('y'), &mut app, &mut store);
    assert_eq!(store.len(), 2);
    assert_eq!(app.category_index, 1);
}

#[test]
fn test_command_mode_round_trip() {
    let (mut app, mut store) = setup();
    press(KeyCode::Char(':'), &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Command);
    type_str("txn 25 movie", &mut app, &mut store);
    press(KeyCode::Enter, &mut app, &mut store);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.command_input.is_empty());
    assert_eq!(store.get(0).unwrap().spent, dec!(825));
}

#[test]
fn test_backspace_on_empty_command_leaves_command_mode() {
    let (mut app, mut store) = setup();
    press(KeyCode::Char(':'), &mut app, &mut store);
    press(KeyCode::Char('q'), &mut app, &mut store);
    press(KeyCode::Backspace, &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.running);
}
