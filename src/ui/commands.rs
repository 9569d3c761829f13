use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use super::forms;
use crate::store::BudgetStore;
use crate::validate;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut BudgetStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("i", "Go to Insights", cmd_insights, r);
    register_command!("insights", "Go to Insights", cmd_insights, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add category (e.g. :add Health 300)",
        cmd_add,
        r
    );
    register_command!(
        "edit",
        "Rename/reallocate selected category (e.g. :edit Groceries 1200)",
        cmd_edit,
        r
    );
    register_command!("delete", "Delete selected category", cmd_delete, r);
    register_command!(
        "txn",
        "Record spending on selected category (e.g. :txn 50 coffee)",
        cmd_txn,
        r
    );
    register_command!(
        "select",
        "Select category by name (e.g. :select Food)",
        cmd_select,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &mut BudgetStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, args, "running command");
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `"<name words> <amount>"`: the last token is the amount.
fn split_trailing_amount(args: &str) -> Option<(&str, &str)> {
    let (name, amount) = args.rsplit_once(' ')?;
    Some((name.trim(), amount))
}

/// Split `"<amount> <description words>"`: the first token is the amount.
fn split_leading_amount(args: &str) -> Option<(&str, &str)> {
    let (amount, desc) = args.split_once(' ')?;
    Some((amount, desc.trim()))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut BudgetStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _store: &mut BudgetStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_insights(_args: &str, app: &mut App, store: &mut BudgetStore) -> anyhow::Result<()> {
    app.sync(store);
    app.screen = Screen::Insights;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut BudgetStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &mut BudgetStore) -> anyhow::Result<()> {
    let Some((name, amount)) = split_trailing_amount(args) else {
        app.set_status("Usage: :add <name> <amount>. Example: :add Health 300");
        return Ok(());
    };

    match validate::category_form(name, amount) {
        Ok((name, allocated)) => {
            forms::add_category(app, store, name, allocated);
            app.screen = Screen::Dashboard;
        }
        Err(errors) => {
            if let Some(err) = errors.first.or(errors.second) {
                app.set_status(err.to_string());
            }
        }
    }
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, store: &mut BudgetStore) -> anyhow::Result<()> {
    let index = app.category_index;
    if store.get(index).is_none() {
        app.set_status("No category selected");
        return Ok(());
    }
    let Some((name, amount)) = split_trailing_amount(args) else {
        app.set_status("Usage: :edit <name> <amount>. Example: :edit Groceries 1200");
        return Ok(());
    };

    match validate::category_form(name, amount) {
        Ok((name, allocated)) => forms::edit_category(app, store, index, name, allocated),
        Err(errors) => {
            if let Some(err) = errors.first.or(errors.second) {
                app.set_status(err.to_string());
            }
        }
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, store: &mut BudgetStore) -> anyhow::Result<()> {
    forms::request_delete(app, store);
    Ok(())
}

fn cmd_txn(args: &str, app: &mut App, store: &mut BudgetStore) -> anyhow::Result<()> {
    let index = app.category_index;
    let Some(category) = store.get(index) else {
        app.set_status("No category selected");
        return Ok(());
    };
    let Some((amount, desc)) = split_leading_amount(args) else {
        app.set_status("Usage: :txn <amount> <description>. Example: :txn 50 coffee");
        return Ok(());
    };

    match validate::transaction_form(category, desc, amount) {
        Ok((description, amount)) => {
            forms::add_transaction(app, store, index, &description, amount);
        }
        Err(errors) => {
            if let Some(err) = errors.second.or(errors.first) {
                app.set_status(err.to_string());
            }
        }
    }
    Ok(())
}

fn cmd_select(args: &str, app: &mut App, store: &mut BudgetStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :select <category name>");
        return Ok(());
    }
    match crate::models::Category::position_by_name(store.categories(), args) {
        Some(index) => {
            app.select(index);
            app.screen = Screen::Dashboard;
            app.set_status(format!("Selected: {args}"));
        }
        None => app.set_status(format!("Category '{args}' not found")),
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
