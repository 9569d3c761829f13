use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

use crate::store::{BudgetStore, StoreEvent};

pub(crate) const LOG_ENV: &str = "BUDGET_MANAGER_LOG";
const LOG_FILE: &str = "budget-manager.log";

/// Where log lines go. The TUI owns the terminal, so it logs to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogTarget {
    File,
    Stderr,
}

impl LogTarget {
    fn default_directive(self) -> &'static str {
        match self {
            Self::File => "info",
            Self::Stderr => "warn",
        }
    }
}

fn filter(target: LogTarget) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(target.default_directive()))
}

/// Install the global subscriber. Safe to call more than once; only the
/// first call takes effect. If the log file cannot be opened the app keeps
/// running without logs.
pub(crate) fn init(target: LogTarget) {
    let dirs = directories::ProjectDirs::from("com", "budget-manager", "BudgetManager");
    let data_dir = dirs.as_ref().map(|d| d.data_local_dir());
    if let Err(e) = install(target, data_dir) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
}

fn install(target: LogTarget, data_dir: Option<&Path>) -> Result<()> {
    let result = match target {
        LogTarget::Stderr => fmt()
            .with_env_filter(filter(target))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File => {
            let dir =
                data_dir.ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
            let file = open_log_file(dir)?;
            fmt()
                .with_env_filter(filter(target))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

fn open_log_file(dir: &Path) -> Result<File> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Store listener that records every mutation.
pub(crate) fn log_event(event: &StoreEvent, store: &BudgetStore) {
    match event {
        StoreEvent::CategoryAdded { index } | StoreEvent::CategoryEdited { index } => {
            if let Some(cat) = store.get(*index) {
                tracing::debug!(
                    ?event,
                    name = %cat.name,
                    allocated = %cat.allocated,
                    spent = %cat.spent,
                    "category changed"
                );
            }
        }
        StoreEvent::CategoryDeleted { index, name } => {
            tracing::debug!(index, name = %name, remaining = store.len(), "category deleted");
        }
        StoreEvent::TransactionAdded {
            index,
            description,
            amount,
        } => {
            let spent = store.get(*index).map(|c| c.spent).unwrap_or_default();
            tracing::debug!(
                index,
                description = %description,
                amount = %amount,
                spent = %spent,
                "transaction recorded"
            );
        }
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod logging_tests;
