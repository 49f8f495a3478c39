use std::cmp::Ordering;
use std::collections::HashSet;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::expense::Expense;
use crate::models::view::{Aggregate, CategoryFilter, ExpenseView, SortKey};

/// Derives what the expense table shows: filter → sort → aggregate.
///
/// Pure business logic: takes a borrowed collection and returns new
/// values. Nothing here touches storage.
pub struct ViewService;

impl ViewService {
    pub fn new() -> Self {
        Self
    }

    /// Build the full view for a filter and an optional sort.
    /// `None` keeps insertion order.
    pub fn build_view(
        &self,
        expenses: &[Expense],
        filter: &CategoryFilter,
        sort: Option<SortKey>,
    ) -> ExpenseView {
        let mut rows = self.filter(expenses, filter);
        if let Some(key) = sort {
            self.sort(&mut rows, key);
        }
        let aggregate = self.aggregate(&rows);

        ExpenseView {
            rows,
            aggregate,
            filter: filter.clone(),
            sort,
        }
    }

    /// Copy out the records that pass `filter`, in their existing order.
    pub fn filter(&self, expenses: &[Expense], filter: &CategoryFilter) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| filter.matches(&e.category))
            .cloned()
            .collect()
    }

    /// Stable in-place sort.
    ///
    /// Amount orders compare line totals (`amount * quantity`), not the unit
    /// amount. Records whose date does not parse go last in both date orders.
    pub fn sort(&self, rows: &mut [Expense], key: SortKey) {
        match key {
            SortKey::DateDesc => rows.sort_by(|a, b| compare_dates(a, b, true)),
            SortKey::DateAsc => rows.sort_by(|a, b| compare_dates(a, b, false)),
            SortKey::AmountDesc => rows.sort_by(|a, b| b.line_total().total_cmp(&a.line_total())),
            SortKey::AmountAsc => rows.sort_by(|a, b| a.line_total().total_cmp(&b.line_total())),
            SortKey::CategoryAsc => rows.sort_by(|a, b| locale_cmp(&a.category, &b.category)),
            SortKey::CategoryDesc => rows.sort_by(|a, b| locale_cmp(&b.category, &a.category)),
        }
    }

    /// Count and total over exactly `rows`. Non-finite line totals add zero.
    pub fn aggregate(&self, rows: &[Expense]) -> Aggregate {
        rows.iter().fold(Aggregate::default(), |mut acc, e| {
            let line = e.line_total();
            acc.count += 1;
            acc.total += if line.is_finite() { line } else { 0.0 };
            acc
        })
    }

    /// Options for a category selector: `All` first, then every distinct
    /// trimmed, non-empty category of the full collection.
    ///
    /// Distinctness is case-sensitive ("Food" and "food" are both listed)
    /// even though filtering by either matches both.
    pub fn categories(&self, expenses: &[Expense]) -> Vec<CategoryFilter> {
        let mut seen = HashSet::new();
        let mut categories: Vec<&str> = expenses
            .iter()
            .map(|e| e.category.trim())
            .filter(|c| !c.is_empty() && seen.insert(*c))
            .collect();
        categories.sort_by(|a, b| locale_cmp(a, b));

        std::iter::once(CategoryFilter::All)
            .chain(
                categories
                    .into_iter()
                    .map(|c| CategoryFilter::Category(c.to_string())),
            )
            .collect()
    }
}

impl Default for ViewService {
    fn default() -> Self {
        Self::new()
    }
}

/// Locale-style string ordering: accents and case are ignored first, then
/// lowercase sorts before uppercase, then raw code points decide.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn collation_key(input: &str) -> String {
    input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn compare_dates(a: &Expense, b: &Expense, descending: bool) -> Ordering {
    match (a.parsed_date(), b.parsed_date()) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
