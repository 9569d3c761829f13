use rust_decimal::Decimal;

use crate::store::BudgetStore;

/// Per-category line of the insights report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryInsight {
    pub(crate) name: String,
    pub(crate) allocated: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
    /// `spent / allocated`, uncapped.
    pub(crate) utilization: Decimal,
    /// This category's fraction of all spending. Zero when nothing is spent.
    pub(crate) share: Decimal,
}

impl CategoryInsight {
    pub(crate) fn is_over_budget(&self) -> bool {
        self.spent > self.allocated
    }
}

/// Aggregate totals computed from a store snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Insights {
    pub(crate) total_budget: Decimal,
    pub(crate) total_allocated: Decimal,
    pub(crate) total_spent: Decimal,
    pub(crate) rows: Vec<CategoryInsight>,
}

impl Insights {
    pub(crate) fn compute(store: &BudgetStore) -> Self {
        let categories = store.categories();
        let total_allocated = saturating_sum(categories.iter().map(|c| c.allocated));
        let total_spent = saturating_sum(categories.iter().map(|c| c.spent));

        let rows = categories
            .iter()
            .map(|c| CategoryInsight {
                name: c.name.clone(),
                allocated: c.allocated,
                spent: c.spent,
                remaining: c.remaining(),
                utilization: c.utilization(),
                share: if total_spent > Decimal::ZERO {
                    c.spent.checked_div(total_spent).unwrap_or(Decimal::ONE)
                } else {
                    Decimal::ZERO
                },
            })
            .collect();

        Self {
            total_budget: store.total_budget(),
            total_allocated,
            total_spent,
            rows,
        }
    }

    /// Allocated but not yet spent, across all categories.
    pub(crate) fn total_remaining(&self) -> Decimal {
        self.total_allocated.saturating_sub(self.total_spent)
    }

    /// Part of the total budget not assigned to any category. Negative when
    /// the categories are over-allocated; the two figures are never reconciled.
    pub(crate) fn unallocated(&self) -> Decimal {
        self.total_budget.saturating_sub(self.total_allocated)
    }

    pub(crate) fn over_budget(&self) -> Vec<&CategoryInsight> {
        self.rows.iter().filter(|r| r.is_over_budget()).collect()
    }

    /// Rows ordered by amount spent, largest first. Ties keep store order.
    pub(crate) fn by_spending(&self) -> Vec<&CategoryInsight> {
        let mut rows: Vec<&CategoryInsight> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.spent.cmp(&a.spent));
        rows
    }
}

/// Sum that pins at `Decimal::MAX` instead of overflowing.
fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

#[cfg(test)]
mod tests;
