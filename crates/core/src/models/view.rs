use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::expense::Expense;
use crate::errors::CoreError;

/// Sort order for the expense table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Latest date first (default for display)
    #[default]
    DateDesc,
    /// Earliest date first
    DateAsc,
    /// Largest line total first
    AmountDesc,
    /// Smallest line total first
    AmountAsc,
    /// Category A → Z
    CategoryAsc,
    /// Category Z → A
    CategoryDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::AmountDesc,
        SortKey::AmountAsc,
        SortKey::CategoryAsc,
        SortKey::CategoryDesc,
    ];

    /// Wire name, e.g. `amount-desc`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::AmountDesc => "amount-desc",
            SortKey::AmountAsc => "amount-asc",
            SortKey::CategoryAsc => "category-asc",
            SortKey::CategoryDesc => "category-desc",
        }
    }

    /// Human label for a sort selector.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "Date (newest)",
            SortKey::DateAsc => "Date (oldest)",
            SortKey::AmountDesc => "Amount (high → low)",
            SortKey::AmountAsc => "Amount (low → high)",
            SortKey::CategoryAsc => "Category (A → Z)",
            SortKey::CategoryDesc => "Category (Z → A)",
        }
    }

    /// Like `from_str`, but an unrecognized key means "keep insertion order".
    #[must_use]
    pub fn parse_lenient(value: &str) -> Option<SortKey> {
        value.parse().ok()
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSortKey(s.to_string()))
    }
}

/// Category restriction applied before sorting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No restriction
    #[default]
    All,
    /// Only records whose category equals this one, ignoring case
    Category(String),
}

impl CategoryFilter {
    /// Wire value of the pass-through option.
    pub const ALL_SENTINEL: &'static str = "all";

    /// `"all"` (or an empty selection) is the pass-through sentinel; anything
    /// else is taken verbatim as a category.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == Self::ALL_SENTINEL {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(wanted) => category.to_lowercase() == wanted.to_lowercase(),
        }
    }

    /// Wire value, e.g. `all` or `Food`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL_SENTINEL,
            CategoryFilter::Category(c) => c,
        }
    }

    /// Human label for a filter selector.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Category(c) => c,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count and summed line totals of a filtered sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub count: usize,
    pub total: f64,
}

/// A derived, ready-to-render view of the collection.
///
/// The rows are owned copies; changing them never touches the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseView {
    /// Filtered and sorted records
    pub rows: Vec<Expense>,

    /// Totals over `rows`
    pub aggregate: Aggregate,

    /// The filter that produced this view
    pub filter: CategoryFilter,

    /// The sort that produced this view (`None` = insertion order)
    pub sort: Option<SortKey>,
}
