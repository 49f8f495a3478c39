use crate::errors::CoreError;
use crate::models::expense::{parse_date, ExpenseForm, NewExpense};

/// The validation boundary between a front end's raw form fields and the
/// store. Nothing reaches `ExpenseStore::add` without passing through here.
///
/// Every parse is explicit and total: a field either produces a value or a
/// `CoreError::Validation` naming it. No silent defaults.
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate all fields of a submitted form.
    ///
    /// Rules:
    /// - title, category and date must be non-empty after trimming
    /// - date must be a `YYYY-MM-DD` calendar date
    /// - amount must be a finite number ≥ 0
    /// - quantity must be a whole number ≥ 1
    pub fn validate(&self, form: &ExpenseForm) -> Result<NewExpense, CoreError> {
        let title = parse_required("title", &form.title)?;
        let amount = parse_amount(&form.amount)?;
        let quantity = parse_quantity(&form.quantity)?;
        let category = parse_required("category", &form.category)?;
        let date = parse_required("date", &form.date)?;
        if parse_date(&date).is_none() {
            return Err(CoreError::validation(
                "date",
                format!("'{date}' is not a valid YYYY-MM-DD date"),
            ));
        }

        Ok(NewExpense {
            title,
            amount,
            quantity,
            category,
            date,
        })
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-empty after trimming; returns the trimmed text.
pub fn parse_required(field: &'static str, raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// A finite, non-negative decimal number.
pub fn parse_amount(raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| CoreError::validation("amount", format!("'{trimmed}' is not a number")))?;
    if !amount.is_finite() {
        return Err(CoreError::validation("amount", "must be a finite number"));
    }
    if amount < 0.0 {
        return Err(CoreError::validation("amount", "must not be negative"));
    }
    Ok(amount)
}

/// A whole number of at least one.
pub fn parse_quantity(raw: &str) -> Result<u32, CoreError> {
    let trimmed = raw.trim();
    let quantity: u32 = trimmed.parse().map_err(|_| {
        CoreError::validation("quantity", format!("'{trimmed}' is not a whole number"))
    })?;
    if quantity < 1 {
        return Err(CoreError::validation("quantity", "must be at least 1"));
    }
    Ok(quantity)
}
