use rust_decimal::Decimal;

/// A spending category with its budget ceiling and running total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub allocated: Decimal,
    pub spent: Decimal,
}

impl Category {
    pub fn new(name: String, allocated: Decimal) -> Self {
        Self {
            name,
            allocated,
            spent: Decimal::ZERO,
        }
    }

    /// Build a category that already has spending against it (seed data).
    pub fn with_spent(name: String, allocated: Decimal, spent: Decimal) -> Self {
        Self {
            name,
            allocated,
            spent,
        }
    }

    /// Allocation left to spend. Negative once spending passes the allocation.
    pub fn remaining(&self) -> Decimal {
        self.allocated.saturating_sub(self.spent)
    }

    /// Fraction of the allocation already spent (`spent / allocated`).
    /// Saturates at `Decimal::MAX` when the allocation is tiny next to spending.
    pub fn utilization(&self) -> Decimal {
        if self.allocated > Decimal::ZERO {
            self.spent
                .checked_div(self.allocated)
                .unwrap_or(Decimal::MAX)
        } else {
            Decimal::ZERO
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.allocated
    }

    /// Find a category by name (case-insensitive), returning its index.
    pub fn position_by_name(categories: &[Category], name: &str) -> Option<usize> {
        let lower = name.to_lowercase();
        categories
            .iter()
            .position(|c| c.name.to_lowercase() == lower)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
