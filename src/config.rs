use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::Category;
use crate::store::{seeds, BudgetStore};
use crate::validate;

pub(crate) const CONFIG_ENV: &str = "BUDGET_MANAGER_CONFIG";
const CONFIG_FILE: &str = "config.json";

/// Start-up data for the store. Read once; never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default = "seeds::total_budget")]
    pub(crate) total_budget: Decimal,
    #[serde(default = "Config::default_categories")]
    pub(crate) categories: Vec<SeedCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SeedCategory {
    pub(crate) name: String,
    pub(crate) allocated: Decimal,
    #[serde(default)]
    pub(crate) spent: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            total_budget: seeds::total_budget(),
            categories: Self::default_categories(),
        }
    }
}

/// Where the config came from, for `budget-manager config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    Explicit(PathBuf),
    Default(PathBuf),
    BuiltIn,
}

impl Config {
    fn default_categories() -> Vec<SeedCategory> {
        seeds::categories()
            .into_iter()
            .map(|c| SeedCategory {
                name: c.name,
                allocated: c.allocated,
                spent: c.spent,
            })
            .collect()
    }

    /// Resolve the config path: explicit flag, then `BUDGET_MANAGER_CONFIG`,
    /// then `config.json` in the platform config directory.
    pub(crate) fn locate(flag: Option<&str>) -> ConfigSource {
        if let Some(path) = flag {
            return ConfigSource::Explicit(PathBuf::from(path));
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return ConfigSource::Explicit(PathBuf::from(path));
        }
        match directories::ProjectDirs::from("com", "budget-manager", "BudgetManager") {
            Some(dirs) => ConfigSource::Default(dirs.config_dir().join(CONFIG_FILE)),
            None => ConfigSource::BuiltIn,
        }
    }

    /// Load from `source`. A missing default file falls back to the built-in
    /// seeds; a missing explicit file is an error.
    pub(crate) fn load(source: &ConfigSource) -> Result<Self> {
        let config = match source {
            ConfigSource::Explicit(path) => Self::from_file(path)?,
            ConfigSource::Default(path) if path.exists() => Self::from_file(path)?,
            ConfigSource::Default(_) | ConfigSource::BuiltIn => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.total_budget <= Decimal::ZERO {
            anyhow::bail!("total_budget must be greater than zero");
        }
        if self.total_budget > validate::max_amount() {
            anyhow::bail!("total_budget cannot exceed {}", validate::max_amount());
        }
        for (i, seed) in self.categories.iter().enumerate() {
            validate::category_name(&seed.name)
                .with_context(|| format!("Invalid seed category #{}", i + 1))?;
            if seed.allocated <= Decimal::ZERO {
                anyhow::bail!(
                    "Invalid seed category '{}': allocated must be greater than zero",
                    seed.name
                );
            }
            if seed.allocated.max(seed.spent) > validate::max_amount() {
                anyhow::bail!(
                    "Invalid seed category '{}': amounts cannot exceed {}",
                    seed.name,
                    validate::max_amount()
                );
            }
            if seed.spent < Decimal::ZERO {
                anyhow::bail!(
                    "Invalid seed category '{}': spent cannot be negative",
                    seed.name
                );
            }
        }
        Ok(())
    }

    pub(crate) fn build_store(&self) -> BudgetStore {
        let categories = self
            .categories
            .iter()
            .map(|s| Category::with_spent(s.name.trim().to_string(), s.allocated, s.spent))
            .collect();
        BudgetStore::with_categories(self.total_budget, categories)
    }
}

impl ConfigSource {
    pub(crate) fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Default(p) => Some(p),
            Self::BuiltIn => None,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
