use std::cell::Cell;
use std::rc::Rc;

use chrono::Local;

use crate::insights::Insights;
use crate::models::Category;
use crate::store::{BudgetStore, ListenerId};
use crate::validate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Insights,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Insights]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Insights => write!(f, "Insights"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteCategory { index: usize, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormKind {
    NewCategory,
    EditCategory { index: usize },
    Transaction { index: usize },
}

impl FormKind {
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::NewCategory => "Add Category",
            Self::EditCategory { .. } => "Edit Category",
            Self::Transaction { .. } => "Add Transaction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormField {
    pub(crate) label: &'static str,
    pub(crate) value: String,
    pub(crate) error: Option<ValidationError>,
}

impl FormField {
    fn new(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            error: None,
        }
    }
}

/// A two-field popup form. Errors are shown inline under each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Form {
    pub(crate) kind: FormKind,
    pub(crate) fields: [FormField; 2],
    pub(crate) focus: usize,
}

impl Form {
    pub(crate) fn new_category() -> Self {
        Self {
            kind: FormKind::NewCategory,
            fields: [
                FormField::new("Category Name", String::new()),
                FormField::new("Allocated Amount", String::new()),
            ],
            focus: 0,
        }
    }

    /// Edit form pre-filled with the category's current values.
    pub(crate) fn edit_category(index: usize, category: &Category) -> Self {
        Self {
            kind: FormKind::EditCategory { index },
            fields: [
                FormField::new("Category Name", category.name.clone()),
                FormField::new("Allocated Amount", category.allocated.to_string()),
            ],
            focus: 0,
        }
    }

    pub(crate) fn transaction(index: usize) -> Self {
        Self {
            kind: FormKind::Transaction { index },
            fields: [
                FormField::new("Description", String::new()),
                FormField::new("Amount Spent", String::new()),
            ],
            focus: 0,
        }
    }

    pub(crate) fn focused_mut(&mut self) -> &mut FormField {
        let focus = self.focus.min(self.fields.len() - 1);
        &mut self.fields[focus]
    }

    pub(crate) fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub(crate) fn prev_field(&mut self) {
        self.focus = if self.focus == 0 {
            self.fields.len() - 1
        } else {
            self.focus - 1
        };
    }

    pub(crate) fn push_char(&mut self, c: char) {
        let field = self.focused_mut();
        field.value.push(c);
        field.error = None;
    }

    pub(crate) fn pop_char(&mut self) {
        let field = self.focused_mut();
        field.value.pop();
        field.error = None;
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: String,

    // Dashboard
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Insights (recomputed when the store reports a change)
    pub(crate) insights: Insights,
    stale: Rc<Cell<bool>>,

    // Popup form
    pub(crate) form: Option<Form>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(store: &BudgetStore) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today: Local::now().format("%Y-%m-%d").to_string(),

            category_index: 0,
            category_scroll: 0,

            insights: Insights::compute(store),
            stale: Rc::new(Cell::new(false)),

            form: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Subscribe to the store so the cached insights and selection are
    /// refreshed after every mutation.
    pub(crate) fn watch(&self, store: &mut BudgetStore) -> ListenerId {
        let stale = Rc::clone(&self.stale);
        store.subscribe(move |_, _| stale.set(true))
    }

    /// Apply pending store changes. Cheap when nothing changed.
    pub(crate) fn sync(&mut self, store: &BudgetStore) {
        if !self.stale.replace(false) {
            return;
        }
        self.insights = Insights::compute(store);
        self.clamp_selection(store.len());
    }

    /// Keep the cursor on an existing row after deletes.
    pub(crate) fn clamp_selection(&mut self, len: usize) {
        if self.category_index >= len {
            self.category_index = len.saturating_sub(1);
        }
        if self.category_scroll > self.category_index {
            self.category_scroll = self.category_index;
        }
    }

    /// Move the cursor to `index`, scrolling so it stays visible.
    pub(crate) fn select(&mut self, index: usize) {
        self.category_index = index;
        let page = self.visible_rows.max(1);
        if index < self.category_scroll {
            self.category_scroll = index;
        } else if index >= self.category_scroll + page {
            self.category_scroll = index + 1 - page;
        }
    }

    #[cfg(test)]
    pub(crate) fn is_stale(&self) -> bool {
        self.stale.get()
    }

    pub(crate) fn selected_category<'a>(&self, store: &'a BudgetStore) -> Option<&'a Category> {
        store.get(self.category_index)
    }

    pub(crate) fn open_form(&mut self, form: Form) {
        self.form = Some(form);
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
