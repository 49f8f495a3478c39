use serde_json::Value;

use crate::errors::CoreError;
use crate::models::expense::Expense;

/// Result of decoding a persisted blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedBlob {
    /// Records that decoded cleanly, in stored order
    pub expenses: Vec<Expense>,

    /// Number of array elements that were not valid expense objects
    pub skipped: usize,
}

/// Serialize the whole collection to the blob format: a JSON array of
/// `{id, title, amount, quantity, category, date}` objects.
pub fn encode_blob(expenses: &[Expense]) -> Result<String, CoreError> {
    serde_json::to_string(expenses)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize expenses: {e}")))
}

/// Parse a blob.
///
/// Malformed JSON and non-array values are errors; the caller decides how
/// soft to be about them. Every object element becomes a record, with odd
/// fields coerced (see [`Expense`]). Only elements that are not objects at
/// all are dropped and counted.
pub fn decode_blob(raw: &str) -> Result<DecodedBlob, CoreError> {
    let value: Value = serde_json::from_str(raw)?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(CoreError::Deserialization(format!(
                "Expected a JSON array of expenses, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut decoded = DecodedBlob {
        expenses: Vec::with_capacity(items.len()),
        skipped: 0,
    };
    for item in items {
        if !item.is_object() {
            tracing::debug!("skipping non-object element: {}", json_kind(&item));
            decoded.skipped += 1;
            continue;
        }
        match serde_json::from_value::<Expense>(item) {
            Ok(expense) => decoded.expenses.push(expense),
            Err(e) => {
                tracing::debug!("skipping undecodable expense record: {e}");
                decoded.skipped += 1;
            }
        }
    }

    Ok(decoded)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
