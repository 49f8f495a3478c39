use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ISO 8601 calendar date, the only date shape the tracker writes.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded expense.
///
/// Records are never mutated after creation. The `date` is kept as the
/// stored string so that blobs written by older front ends (which may hold
/// dates we cannot parse) survive a load/save round trip unchanged.
///
/// Decoding coerces rather than rejects: a stored object with odd or missing
/// fields still loads, so the next write never drops it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Opaque unique identifier, assigned by the store.
    #[serde(default, deserialize_with = "coerce::text")]
    pub id: String,

    /// What was bought (trimmed, non-empty)
    #[serde(default, deserialize_with = "coerce::text")]
    pub title: String,

    /// Unit price (non-negative). Unreadable stored values load as 0.
    #[serde(default, deserialize_with = "coerce::amount")]
    pub amount: f64,

    /// Number of units (at least 1). Stored fractions are floored.
    #[serde(default = "coerce::unit_quantity", deserialize_with = "coerce::quantity")]
    pub quantity: u32,

    /// Grouping label (trimmed, non-empty)
    #[serde(default, deserialize_with = "coerce::text")]
    pub category: String,

    /// Calendar date, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "coerce::text")]
    pub date: String,
}

impl Expense {
    /// `amount * quantity`.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.amount * f64::from(self.quantity)
    }

    /// The stored date, if it is a valid calendar date.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Parse a `YYYY-MM-DD` string, ignoring surrounding whitespace.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Input to `ExpenseStore::add`. Already numeric; text fields are trimmed
/// by the store, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub title: String,
    pub amount: f64,
    pub quantity: u32,
    pub category: String,
    pub date: String,
}

impl NewExpense {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        quantity: u32,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            quantity,
            category: category.into(),
            date: date.into(),
        }
    }
}

/// Raw, unparsed form fields as a front end collects them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    pub quantity: String,
    pub category: String,
    pub date: String,
}

/// Lenient decoding for persisted records written by older front ends.
/// Every field maps to a defined value.
mod coerce {
    use serde::de::Deserializer;
    use serde::Deserialize;
    use serde_json::Value;

    /// Finite number behind a JSON value, if any. Blank strings read as 0.
    fn as_number(value: &Value) -> Option<f64> {
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s.trim().is_empty() => Some(0.0),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        };
        number.filter(|n| n.is_finite())
    }

    /// Null, non-numeric and non-finite amounts become 0.
    pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(as_number(&value).unwrap_or(0.0))
    }

    /// Floored and clamped into `u32`; unreadable quantities become 1.
    pub fn quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(as_number(&value).map_or_else(unit_quantity, |n| {
            n.floor().clamp(0.0, f64::from(u32::MAX)) as u32
        }))
    }

    pub fn unit_quantity() -> u32 {
        1
    }

    /// Strings pass through, null is empty, other scalars are stringified.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}
