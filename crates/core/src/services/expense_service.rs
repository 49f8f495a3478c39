use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::expense::{Expense, NewExpense};
use crate::storage::backend::KeyValueStore;
use crate::storage::manager::StorageManager;

/// Owns the authoritative expense collection and mirrors it to a key-value
/// backend after every mutation.
///
/// Insertion order is preserved; it is the display order when no sort is
/// chosen. Operations never fail: a write error is logged, the store is
/// marked unsaved, and the in-memory collection stays authoritative until
/// the next successful write.
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    backend: Box<dyn KeyValueStore>,
    key: String,
    unsaved: bool,
}

impl std::fmt::Debug for ExpenseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseStore")
            .field("key", &self.key)
            .field("expenses", &self.expenses.len())
            .field("unsaved", &self.unsaved)
            .finish()
    }
}

impl ExpenseStore {
    /// Open a store and hydrate it from whatever is persisted under `key`.
    pub fn open(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut store = Self {
            expenses: Vec::new(),
            backend,
            key: key.into(),
            unsaved: false,
        };
        store.load();
        store
    }

    /// Re-read the persisted blob, replacing the in-memory collection.
    /// Absent or corrupt data yields an empty collection.
    ///
    /// Stored records without an id get a fresh one so they stay deletable;
    /// the new ids reach the backend with the next write.
    pub fn load(&mut self) -> Vec<Expense> {
        self.expenses = StorageManager::load_expenses(self.backend.as_ref(), &self.key);
        self.unsaved = false;

        let blank: Vec<usize> = self
            .expenses
            .iter()
            .enumerate()
            .filter(|(_, e)| e.id.trim().is_empty())
            .map(|(i, _)| i)
            .collect();
        for &i in &blank {
            let id = self.next_id();
            self.expenses[i].id = id;
        }
        if !blank.is_empty() {
            tracing::warn!(
                key = %self.key,
                count = blank.len(),
                "assigned ids to stored expenses without one"
            );
        }

        tracing::debug!(key = %self.key, count = self.expenses.len(), "loaded expenses");
        self.expenses.clone()
    }

    /// Append a new record. The input is trusted: validation happens at the
    /// boundary before this is called. Title and category are trimmed here,
    /// and a non-finite amount is stored as 0 so the record reloads unchanged.
    pub fn add(&mut self, input: NewExpense) -> Expense {
        let amount = if input.amount.is_finite() {
            input.amount
        } else {
            tracing::warn!(amount = input.amount, "non-finite amount stored as 0");
            0.0
        };
        let expense = Expense {
            id: self.next_id(),
            title: input.title.trim().to_string(),
            amount,
            quantity: input.quantity,
            category: input.category.trim().to_string(),
            date: input.date,
        };
        self.expenses.push(expense.clone());
        tracing::debug!(id = %expense.id, title = %expense.title, "added expense");
        self.persist();
        expense
    }

    /// Remove the record with `id`. Returns `false` (and changes nothing)
    /// when no such record exists.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let removed = self.expenses.len() < before;
        if removed {
            tracing::debug!(id, "removed expense");
        }
        self.persist();
        removed
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.expenses.len(), "clearing all expenses");
        self.expenses.clear();
        self.persist();
    }

    /// Owned snapshot of the collection in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Expense> {
        self.expenses.clone()
    }

    /// Borrowed view of the collection, for read-only pipelines.
    #[must_use]
    pub fn as_slice(&self) -> &[Expense] {
        &self.expenses
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Key of the persisted blob.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// `true` when the last write after a mutation failed and the backend
    /// no longer matches memory.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Write the full collection to the backend again, reporting failure.
    /// Mutations already write; this is for retrying after a failed write.
    pub fn flush(&mut self) -> Result<(), CoreError> {
        let result = StorageManager::save_expenses(self.backend.as_mut(), &self.key, &self.expenses);
        self.unsaved = result.is_err();
        result
    }

    // ── Internal ────────────────────────────────────────────────────

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            tracing::error!(key = %self.key, "failed to persist expenses: {e}");
        }
    }

    /// UUIDv7: millisecond timestamp followed by random bits. Redrawn on the
    /// (practically impossible) collision with an existing id.
    fn next_id(&self) -> String {
        loop {
            let id = Uuid::now_v7().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
