#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::form::FormField;
use crate::models::Category;

fn app_with_store() -> (App, Store) {
    let store = Store::open_in_memory().unwrap();
    (App::load(&store), store)
}

fn fill(app: &mut App, amount: &str, category: Category, date: &str) {
    app.form.amount = amount.into();
    app.form.category = category;
    app.form.date = date.into();
}

#[test]
fn test_load_empty_store() {
    let (app, _store) = app_with_store();
    assert!(app.ledger.is_empty());
    assert_eq!(app.currency, Currency::Usd);
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_valid_submit_adds_first_row_and_persists() {
    let (mut app, store) = app_with_store();
    fill(&mut app, "20", Category::Food, "2024-01-01");
    app.submit_form(&store).unwrap();
    fill(&mut app, "15", Category::Transport, "2024-01-02");
    app.submit_form(&store).unwrap();

    assert_eq!(app.ledger.len(), 2);
    assert_eq!(app.ledger.transactions()[0].category, Category::Transport);
    assert_eq!(store.load_transactions(), app.ledger.transactions());
    assert!(app.form.amount.is_empty());
    assert!(app.form.date.is_empty());
    assert_eq!(app.form.category, Category::Transport);
}

#[test]
fn test_invalid_submit_is_silent_noop() {
    let (mut app, store) = app_with_store();
    for amount in ["0", "-5", "abc"] {
        fill(&mut app, amount, Category::Food, "2024-01-01");
        app.submit_form(&store).unwrap();
    }
    fill(&mut app, "10", Category::Food, "");
    app.submit_form(&store).unwrap();

    assert!(app.ledger.is_empty());
    assert!(app.status_message.is_empty());
    assert!(store.load_transactions().is_empty());
}

#[test]
fn test_delete_removes_and_persists() {
    let (mut app, store) = app_with_store();
    fill(&mut app, "20", Category::Food, "2024-01-01");
    app.submit_form(&store).unwrap();
    fill(&mut app, "15", Category::Transport, "2024-01-02");
    app.submit_form(&store).unwrap();

    let food_id = app.ledger.transactions()[1].id.clone();
    assert_eq!(app.delete_transaction(&food_id, &store).unwrap(), 1);
    assert_eq!(app.ledger.len(), 1);
    assert_eq!(app.ledger.breakdown().total_for(Category::Food), dec!(0));
    assert_eq!(store.load_transactions().len(), 1);

    assert_eq!(app.delete_transaction("missing", &store).unwrap(), 0);
    assert_eq!(app.ledger.len(), 1);
}

#[test]
fn test_delete_last_row_clamps_cursor() {
    let (mut app, store) = app_with_store();
    for day in 1..=3 {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        app.add_transaction(Transaction::new(dec!(1), Category::Other, date), &store)
            .unwrap();
    }
    app.transaction_index = 2;
    let id = app.selected_transaction().unwrap().id.clone();
    app.delete_transaction(&id, &store).unwrap();
    assert_eq!(app.transaction_index, 1);
}

#[test]
fn test_request_delete_needs_confirmation() {
    let (mut app, store) = app_with_store();
    app.request_delete();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());

    fill(&mut app, "20", Category::Food, "2024-01-01");
    app.submit_form(&store).unwrap();
    app.request_delete();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(app.confirm_message.contains("Food"));
    assert!(app.confirm_message.contains("$20.00"));
    assert_eq!(app.ledger.len(), 1);
}

#[test]
fn test_picker_select_sets_currency_and_closes() {
    let (mut app, store) = app_with_store();
    app.open_picker();
    assert_eq!(app.input_mode, InputMode::Picker);
    app.picker_query = "yen".into();
    app.picker_index = 0;
    app.picker_confirm(&store);
    assert_eq!(app.currency, Currency::Jpy);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(store.load_currency(), Currency::Jpy);
}

#[test]
fn test_picker_move_is_clamped() {
    let (mut app, _store) = app_with_store();
    app.open_picker();
    app.picker_move(-5);
    assert_eq!(app.picker_index, 0);
    app.picker_move(100);
    assert_eq!(app.picker_index, Currency::all().len() - 1);
}

#[test]
fn test_picker_opens_on_active_currency() {
    let (mut app, store) = app_with_store();
    app.select_currency(Currency::Gbp, &store);
    app.open_picker();
    assert_eq!(app.picker_matches()[app.picker_index], Currency::Gbp);
}

#[test]
fn test_currency_does_not_change_stored_amounts() {
    let (mut app, store) = app_with_store();
    fill(&mut app, "12.345", Category::Bills, "2024-01-01");
    app.submit_form(&store).unwrap();
    app.select_currency(Currency::Jpy, &store);
    assert_eq!(app.ledger.transactions()[0].amount, dec!(12.35));
    assert_eq!(app.form.focus, FormField::Amount);
}
