use crate::models::expense::parse_date;

/// Shown instead of a confirmation when clear-all has nothing to do.
pub const NOTHING_TO_CLEAR: &str = "No expenses to clear.";

/// Confirmation asked before wiping the collection.
pub const CLEAR_ALL_PROMPT: &str =
    "Are you sure you want to CLEAR ALL expenses? This will remove everything stored locally.";

/// What a front end should do when the user asks to clear everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearAllPrompt {
    /// Collection is empty: show the message, do not call `clear()`
    NothingToClear,
    /// Collection has records: ask, and only clear on a yes
    Confirm,
}

impl ClearAllPrompt {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            ClearAllPrompt::NothingToClear => NOTHING_TO_CLEAR,
            ClearAllPrompt::Confirm => CLEAR_ALL_PROMPT,
        }
    }
}

/// Display formatting for amounts, dates and prompts.
#[derive(Debug, Clone)]
pub struct FormatService {
    currency_symbol: String,
}

impl FormatService {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// `₹1,234.50`: symbol and grouped digits with exactly two decimals.
    /// Non-finite input renders as zero.
    #[must_use]
    pub fn currency(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let fixed = format!("{:.2}", amount.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
        format!(
            "{}{}{}.{}",
            self.currency_symbol,
            sign,
            group_thousands(int_part),
            frac_part
        )
    }

    /// `01 Jan 2024`. Empty stays empty; anything unparseable is shown raw.
    #[must_use]
    pub fn date(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        match parse_date(raw) {
            Some(date) => date.format("%d %b %Y").to_string(),
            None => raw.to_string(),
        }
    }

    /// Delete confirmation naming the record, or a generic one if unknown.
    #[must_use]
    pub fn delete_prompt(&self, title: Option<&str>) -> String {
        format!(
            "Delete \"{}\"? This cannot be undone.",
            title.unwrap_or("this expense")
        )
    }
}

impl Default for FormatService {
    fn default() -> Self {
        Self::new(crate::models::settings::DEFAULT_CURRENCY_SYMBOL)
    }
}

/// Insert `,` every three digits from the right: `1234567` → `1,234,567`.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
