use crate::errors::CoreError;
use crate::models::expense::Expense;

use super::backend::KeyValueStore;
use super::format;

/// High-level storage operations: read/write the expense collection under a
/// single key of a key-value backend.
pub struct StorageManager;

impl StorageManager {
    /// Serialize the full collection and store it under `key`.
    ///
    /// Flow: `[Expense]` → JSON array → one `set(key, blob)`
    pub fn save_expenses(
        backend: &mut dyn KeyValueStore,
        key: &str,
        expenses: &[Expense],
    ) -> Result<(), CoreError> {
        let blob = format::encode_blob(expenses)?;
        backend.set(key, &blob)
    }

    /// Read the collection stored under `key`, failing soft.
    ///
    /// A missing key, unreadable backend, malformed JSON or a non-array value
    /// all yield an empty collection. The cause is logged, never returned.
    pub fn load_expenses(backend: &dyn KeyValueStore, key: &str) -> Vec<Expense> {
        match Self::try_load_expenses(backend, key) {
            Ok(expenses) => expenses,
            Err(e) => {
                tracing::warn!(key, "failed to load persisted expenses, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Strict variant of [`load_expenses`](Self::load_expenses).
    /// A missing key is still `Ok(vec![])`.
    pub fn try_load_expenses(
        backend: &dyn KeyValueStore,
        key: &str,
    ) -> Result<Vec<Expense>, CoreError> {
        let Some(raw) = backend.get(key)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let decoded = format::decode_blob(&raw)?;
        if decoded.skipped > 0 {
            tracing::warn!(
                key,
                skipped = decoded.skipped,
                kept = decoded.expenses.len(),
                "dropped malformed records from persisted expenses"
            );
        }
        Ok(decoded.expenses)
    }
}
