pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use models::{
    expense::{Expense, ExpenseForm, NewExpense},
    settings::Settings,
    view::{CategoryFilter, ExpenseView, SortKey},
};
use services::{
    expense_service::ExpenseStore,
    format_service::{ClearAllPrompt, FormatService},
    validation_service::ValidationService,
    view_service::ViewService,
};
use storage::backend::{KeyValueStore, MemoryStorage};

use errors::CoreError;

/// Main entry point for the Expense Tracker core library.
/// Holds the expense store and all services a front end needs.
#[must_use]
pub struct ExpenseTracker {
    settings: Settings,
    store: ExpenseStore,
    view_service: ViewService,
    validation_service: ValidationService,
    format_service: FormatService,
}

impl std::fmt::Debug for ExpenseTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseTracker")
            .field("expenses", &self.store.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl ExpenseTracker {
    /// Open a tracker over any key-value backend, hydrating from the blob
    /// stored under `settings.storage_key`.
    pub fn open(backend: Box<dyn KeyValueStore>, settings: Settings) -> Self {
        let store = ExpenseStore::open(backend, settings.storage_key.clone());
        let format_service = FormatService::new(settings.currency_symbol.clone());

        Self {
            settings,
            store,
            view_service: ViewService::new(),
            validation_service: ValidationService::new(),
            format_service,
        }
    }

    /// A tracker that persists nowhere but memory.
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStorage::new()), Settings::default())
    }

    /// Open a tracker whose blob lives in `<dir>/<storage_key>.json`
    /// (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_dir(dir: impl Into<std::path::PathBuf>, settings: Settings) -> Self {
        let backend = storage::backend::FileStorage::new(dir);
        Self::open(Box::new(backend), settings)
    }

    // ── Expense Management ──────────────────────────────────────────

    /// Add an already-validated expense. Returns the stored record.
    pub fn add_expense(&mut self, input: NewExpense) -> Expense {
        self.store.add(input)
    }

    /// Validate raw form fields and add the result.
    /// On a validation error nothing is stored.
    pub fn submit_form(&mut self, form: &ExpenseForm) -> Result<Expense, CoreError> {
        let input = self.validation_service.validate(form)?;
        Ok(self.store.add(input))
    }

    /// Delete by id. Unknown ids are a no-op returning `false`.
    pub fn remove_expense(&mut self, id: &str) -> bool {
        self.store.remove_by_id(id)
    }

    /// Delete everything.
    pub fn clear_all(&mut self) {
        self.store.clear();
    }

    /// Snapshot of all expenses in insertion order.
    #[must_use]
    pub fn expenses(&self) -> Vec<Expense> {
        self.store.list()
    }

    #[must_use]
    pub fn get_expense(&self, id: &str) -> Option<&Expense> {
        self.store.get(id)
    }

    #[must_use]
    pub fn expense_count(&self) -> usize {
        self.store.len()
    }

    /// Discard in-memory state and re-read the persisted blob.
    pub fn reload(&mut self) -> Vec<Expense> {
        self.store.load()
    }

    /// Whether the last automatic write failed.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.store.has_unsaved_changes()
    }

    /// Write the collection again, surfacing any storage error.
    pub fn flush(&mut self) -> Result<(), CoreError> {
        self.store.flush()
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Filtered, sorted rows plus their count and total.
    /// `sort = None` keeps insertion order.
    #[must_use]
    pub fn view(&self, filter: &CategoryFilter, sort: Option<SortKey>) -> ExpenseView {
        self.view_service
            .build_view(self.store.as_slice(), filter, sort)
    }

    /// View from raw selector values. Unknown sort keys keep insertion order.
    #[must_use]
    pub fn view_from_selection(&self, filter: &str, sort: &str) -> ExpenseView {
        self.view(&CategoryFilter::parse(filter), SortKey::parse_lenient(sort))
    }

    /// All categories with the configured default sort.
    #[must_use]
    pub fn default_view(&self) -> ExpenseView {
        self.view(&CategoryFilter::All, Some(self.settings.default_sort))
    }

    /// Category selector options, `All` first.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryFilter> {
        self.view_service.categories(self.store.as_slice())
    }

    // ── Confirmations & Formatting ──────────────────────────────────

    /// Text to confirm before deleting `id`.
    #[must_use]
    pub fn delete_prompt(&self, id: &str) -> String {
        self.format_service
            .delete_prompt(self.store.get(id).map(|e| e.title.as_str()))
    }

    /// Whether clear-all should ask, or just report there is nothing to do.
    #[must_use]
    pub fn clear_all_prompt(&self) -> ClearAllPrompt {
        if self.store.is_empty() {
            ClearAllPrompt::NothingToClear
        } else {
            ClearAllPrompt::Confirm
        }
    }

    #[must_use]
    pub fn formatter(&self) -> &FormatService {
        &self.format_service
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export all expenses as pretty-printed JSON (same shape as the blob).
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self.store.as_slice())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize expenses to JSON: {e}")))
    }

    /// Export all expenses as CSV.
    /// Columns: id, title, amount, quantity, line_total, category, date
    #[must_use]
    pub fn export_to_csv(&self) -> String {
        let mut csv = String::from("id,title,amount,quantity,line_total,category,date\n");
        for expense in self.store.as_slice() {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                csv_field(&expense.id),
                csv_field(&expense.title),
                expense.amount,
                expense.quantity,
                expense.line_total(),
                csv_field(&expense.category),
                csv_field(&expense.date),
            ));
        }
        csv
    }
}

/// Quote fields containing commas, quotes or line breaks.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
