use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::config::{Config, ConfigSource};
use crate::insights::Insights;
use crate::store::BudgetStore;
use crate::ui::util::{format_amount, percent};

pub(crate) fn as_cli(args: &[String], store: &BudgetStore, source: &ConfigSource) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], store),
        "insights" | "i" => cli_insights(store),
        "config" => cli_config(source),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budget-manager {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Budget Manager: track spending against category allocations");
    println!();
    println!("Usage: budget-manager [--config <path>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Print budget and per-category totals");
    println!("    --csv                       Write the category table as CSV");
    println!("  insights                      Print utilization and over-budget categories");
    println!("  config                        Show the resolved config file");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment:");
    println!("  BUDGET_MANAGER_CONFIG         Config file path (overridden by --config)");
    println!("  BUDGET_MANAGER_LOG            Log filter, e.g. debug");
}

fn cli_summary(args: &[String], store: &BudgetStore) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.iter().any(|a| a == "--csv") {
        write_summary_csv(store, &mut out)
    } else {
        write_summary(store, &mut out)
    }
}

pub(crate) fn write_summary(store: &BudgetStore, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Total Budget: {}", format_amount(store.total_budget()))?;
    writeln!(out)?;
    if store.is_empty() {
        writeln!(out, "No categories")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<20} {:>14} {:>14} {:>14}",
        "Category", "Allocated", "Spent", "Remaining"
    )?;
    writeln!(out, "{}", "─".repeat(65))?;
    for cat in store.categories() {
        writeln!(
            out,
            "{:<20} {:>14} {:>14} {:>14}",
            cat.name,
            format_amount(cat.allocated),
            format_amount(cat.spent),
            format_amount(cat.remaining()),
        )?;
    }
    Ok(())
}

pub(crate) fn write_summary_csv(store: &BudgetStore, out: &mut impl Write) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["category", "allocated", "spent", "remaining"])?;
    for cat in store.categories() {
        wtr.write_record([
            cat.name.clone(),
            cat.allocated.to_string(),
            cat.spent.to_string(),
            cat.remaining().to_string(),
        ])?;
    }
    wtr.flush().context("Failed to write CSV")?;
    Ok(())
}

fn cli_insights(store: &BudgetStore) -> Result<()> {
    let stdout = io::stdout();
    write_insights(&Insights::compute(store), &mut stdout.lock())
}

pub(crate) fn write_insights(insights: &Insights, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Budget Insights")?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Total Budget: {}", format_amount(insights.total_budget))?;
    writeln!(out, "  Allocated:    {}", format_amount(insights.total_allocated))?;
    writeln!(out, "  Spent:        {}", format_amount(insights.total_spent))?;
    writeln!(out, "  Remaining:    {}", format_amount(insights.total_remaining()))?;
    writeln!(out, "  Unallocated:  {}", format_amount(insights.unallocated()))?;

    let ranked = insights.by_spending();
    if !ranked.is_empty() {
        writeln!(out)?;
        writeln!(out, "Spending by Category:")?;
        for row in ranked {
            writeln!(
                out,
                "  {:<20} {:>14} {:>6} used",
                row.name,
                format_amount(row.spent),
                percent(row.utilization),
            )?;
        }
    }

    let over = insights.over_budget();
    writeln!(out)?;
    if over.is_empty() {
        writeln!(out, "No categories over budget")?;
    } else {
        writeln!(out, "Over budget:")?;
        for row in over {
            writeln!(
                out,
                "  {:<20} {} over",
                row.name,
                format_amount(-row.remaining)
            )?;
        }
    }
    Ok(())
}

fn cli_config(source: &ConfigSource) -> Result<()> {
    match source.path() {
        Some(path) => {
            let state = if path.exists() { "found" } else { "not found" };
            println!("Config: {} ({state})", path.display());
        }
        None => println!("Config: no config directory available"),
    }
    let effective = Config::load(source)?;
    println!();
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
