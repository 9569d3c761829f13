//! Actions that turn user input into store mutations. Every mutation here is
//! preceded by validation; the store itself never sees bad input.

use anyhow::Result;
use rust_decimal::Decimal;

use super::app::{App, Form, FormKind, InputMode, PendingAction};
use super::util::format_amount;
use crate::store::BudgetStore;
use crate::validate::{self, FieldErrors};

pub(crate) fn open_new_category(app: &mut App) {
    app.open_form(Form::new_category());
}

pub(crate) fn open_edit_category(app: &mut App, store: &BudgetStore) {
    match app.selected_category(store) {
        Some(cat) => {
            let form = Form::edit_category(app.category_index, cat);
            app.open_form(form);
        }
        None => app.set_status("No category selected"),
    }
}

pub(crate) fn open_transaction(app: &mut App, store: &BudgetStore) {
    if app.selected_category(store).is_some() {
        app.open_form(Form::transaction(app.category_index));
    } else {
        app.set_status("No category selected");
    }
}

/// Validate the open form and, if every field passes, apply it to the store.
/// On failure the form stays open with inline errors.
pub(crate) fn submit(app: &mut App, store: &mut BudgetStore) -> Result<()> {
    let Some(form) = app.form.as_ref() else {
        return Ok(());
    };
    let kind = form.kind;
    let first = form.fields[0].value.clone();
    let second = form.fields[1].value.clone();

    match kind {
        FormKind::NewCategory => match validate::category_form(&first, &second) {
            Ok((name, allocated)) => {
                app.close_form();
                add_category(app, store, name, allocated);
            }
            Err(errors) => show_errors(app, errors),
        },
        FormKind::EditCategory { index } => {
            if store.get(index).is_none() {
                app.close_form();
                app.set_status("Category no longer exists");
                return Ok(());
            }
            match validate::category_form(&first, &second) {
                Ok((name, allocated)) => {
                    app.close_form();
                    edit_category(app, store, index, name, allocated);
                }
                Err(errors) => show_errors(app, errors),
            }
        }
        FormKind::Transaction { index } => {
            let Some(category) = store.get(index) else {
                app.close_form();
                app.set_status("Category no longer exists");
                return Ok(());
            };
            match validate::transaction_form(category, &first, &second) {
                Ok((description, amount)) => {
                    app.close_form();
                    add_transaction(app, store, index, &description, amount);
                }
                Err(errors) => show_errors(app, errors),
            }
        }
    }
    Ok(())
}

fn show_errors(app: &mut App, errors: FieldErrors) {
    if let Some(form) = app.form.as_mut() {
        // Move focus to the first field that needs fixing
        if errors.first.is_some() {
            form.focus = 0;
        } else if errors.second.is_some() {
            form.focus = 1;
        }
        form.fields[0].error = errors.first;
        form.fields[1].error = errors.second;
    }
    app.set_status("Fix the highlighted fields");
}

// ── Validated mutations ──────────────────────────────────────

pub(crate) fn add_category(
    app: &mut App,
    store: &mut BudgetStore,
    name: String,
    allocated: Decimal,
) {
    tracing::info!(name = %name, allocated = %allocated, "adding category");
    store.add_category(name.clone(), allocated);
    app.sync(store);
    app.select(store.len().saturating_sub(1));
    app.set_status(format!(
        "Added category: {name} ({})",
        format_amount(allocated)
    ));
}

pub(crate) fn edit_category(
    app: &mut App,
    store: &mut BudgetStore,
    index: usize,
    name: String,
    allocated: Decimal,
) {
    tracing::info!(index, name = %name, allocated = %allocated, "editing category");
    store.edit_category(index, name.clone(), allocated);
    app.sync(store);
    app.set_status(format!("Updated category: {name}"));
}

/// The description is shown once in the status line and then dropped.
pub(crate) fn add_transaction(
    app: &mut App,
    store: &mut BudgetStore,
    index: usize,
    description: &str,
    amount: Decimal,
) {
    tracing::info!(index, amount = %amount, "adding transaction");
    store.add_transaction(index, description, amount);
    app.sync(store);
    let name = store.get(index).map(|c| c.name.as_str()).unwrap_or("?");
    app.set_status(format!(
        "Recorded '{description}' ({}) in {name}",
        format_amount(amount)
    ));
}

// ── Deletion ─────────────────────────────────────────────────

pub(crate) fn request_delete(app: &mut App, store: &BudgetStore) {
    let Some(cat) = app.selected_category(store) else {
        app.set_status("No categories to delete");
        return;
    };
    app.confirm_message = format!("Delete category '{}'?", cat.name);
    app.pending_action = Some(PendingAction::DeleteCategory {
        index: app.category_index,
        name: cat.name.clone(),
    });
    app.input_mode = InputMode::Confirm;
}

/// Run the pending action after the user answered `y`.
pub(crate) fn confirm(app: &mut App, store: &mut BudgetStore) {
    if let Some(action) = app.pending_action.take() {
        match action {
            PendingAction::DeleteCategory { index, name } => {
                // Guard against the list having changed under the prompt
                let still_there = store.get(index).is_some_and(|c| c.name == name);
                if still_there {
                    tracing::info!(index, name = %name, "deleting category");
                    store.delete_category(index);
                    app.sync(store);
                    app.set_status(format!("Deleted category: {name}"));
                } else {
                    app.set_status(format!("Category '{name}' no longer exists"));
                }
            }
        }
    }
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
}

pub(crate) fn cancel_confirm(app: &mut App) {
    app.pending_action = None;
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    app.set_status("Cancelled");
}
