pub(crate) mod seeds;

use rust_decimal::Decimal;

use crate::models::Category;

/// Handle returned by [`BudgetStore::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ListenerId(u64);

/// What changed in the store. Delivered to every listener after the mutation
/// has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreEvent {
    CategoryAdded { index: usize },
    CategoryEdited { index: usize },
    CategoryDeleted { index: usize, name: String },
    /// The description is only carried here; the store never keeps it.
    TransactionAdded {
        index: usize,
        description: String,
        amount: Decimal,
    },
}

type Callback = Box<dyn FnMut(&StoreEvent, &BudgetStore)>;

struct Listener {
    id: ListenerId,
    callback: Callback,
}

/// In-memory owner of the budget categories.
///
/// The store trusts its caller: names and amounts are not validated here (see
/// [`crate::validate`]) and index arguments must refer to an existing category.
/// Every mutation notifies all listeners exactly once, in registration order,
/// before returning.
pub(crate) struct BudgetStore {
    total_budget: Decimal,
    categories: Vec<Category>,
    listeners: Vec<Listener>,
    next_listener_id: u64,
}

impl BudgetStore {
    #[cfg(test)]
    pub(crate) fn new(total_budget: Decimal) -> Self {
        Self::with_categories(total_budget, Vec::new())
    }

    pub(crate) fn with_categories(total_budget: Decimal, categories: Vec<Category>) -> Self {
        Self {
            total_budget,
            categories,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// The start-up state: a 5,000 budget and three categories with spending.
    /// Outside tests the same data arrives through `Config::default`.
    #[cfg(test)]
    pub(crate) fn seeded() -> Self {
        Self::with_categories(seeds::total_budget(), seeds::categories())
    }

    pub(crate) fn total_budget(&self) -> Decimal {
        self.total_budget
    }

    pub(crate) fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.categories.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    // ── Listeners ────────────────────────────────────────────

    pub(crate) fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&StoreEvent, &BudgetStore) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push(Listener {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Returns `false` if the listener was already gone.
    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, event: StoreEvent) {
        // Listeners get a shared view of the store, so detach them while they run.
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            (listener.callback)(&event, self);
        }
        self.listeners = listeners;
    }

    // ── Mutations ────────────────────────────────────────────

    /// Append a category with nothing spent.
    pub(crate) fn add_category(&mut self, name: impl Into<String>, allocated: Decimal) {
        self.categories.push(Category::new(name.into(), allocated));
        let index = self.categories.len() - 1;
        self.notify(StoreEvent::CategoryAdded { index });
    }

    /// Replace name and allocation in place. `spent` is left alone.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub(crate) fn edit_category(
        &mut self,
        index: usize,
        name: impl Into<String>,
        allocated: Decimal,
    ) {
        let category = &mut self.categories[index];
        category.name = name.into();
        category.allocated = allocated;
        self.notify(StoreEvent::CategoryEdited { index });
    }

    /// Remove a category, shifting later ones down by one position.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub(crate) fn delete_category(&mut self, index: usize) -> Category {
        let removed = self.categories.remove(index);
        self.notify(StoreEvent::CategoryDeleted {
            index,
            name: removed.name.clone(),
        });
        removed
    }

    /// Fold a transaction into the category's `spent` total. Remaining
    /// allocation is not checked here.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub(crate) fn add_transaction(&mut self, index: usize, description: &str, amount: Decimal) {
        let category = &mut self.categories[index];
        category.spent = category.spent.saturating_add(amount);
        self.notify(StoreEvent::TransactionAdded {
            index,
            description: description.to_string(),
            amount,
        });
    }
}

impl std::fmt::Debug for BudgetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetStore")
            .field("total_budget", &self.total_budget)
            .field("categories", &self.categories)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
