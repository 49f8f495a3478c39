use serde::{Deserialize, Serialize};

use super::view::SortKey;

/// Key under which the collection has always been stored.
pub const DEFAULT_STORAGE_KEY: &str = "kanha_expenses_v1";

/// Symbol prefixed to every displayed amount.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Session settings. Not persisted with the expenses; front ends build
/// them from their own configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key of the persisted blob in the key-value backend.
    pub storage_key: String,

    /// Currency symbol used by the display formatter (e.g., "₹", "$").
    pub currency_symbol: String,

    /// Sort applied when the caller does not choose one.
    pub default_sort: SortKey,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            default_sort: SortKey::default(),
        }
    }
}
