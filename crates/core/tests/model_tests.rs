use chrono::NaiveDate;
use expense_tracker_core::errors::CoreError;
use expense_tracker_core::models::expense::{parse_date, Expense, ExpenseForm, NewExpense};
use expense_tracker_core::models::settings::{Settings, DEFAULT_CURRENCY_SYMBOL, DEFAULT_STORAGE_KEY};
use expense_tracker_core::models::view::{Aggregate, CategoryFilter, SortKey};

fn expense(amount: f64, quantity: u32, date: &str) -> Expense {
    Expense {
        id: "id-1".into(),
        title: "Tea".into(),
        amount,
        quantity,
        category: "Food".into(),
        date: date.into(),
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Expense
// ═══════════════════════════════════════════════════════════════════

mod expense_record {
    use super::*;

    #[test]
    fn line_total_multiplies_amount_by_quantity() {
        assert_eq!(expense(10.0, 2, "2024-01-01").line_total(), 20.0);
        assert_eq!(expense(2.5, 4, "2024-01-01").line_total(), 10.0);
        assert_eq!(expense(0.0, 7, "2024-01-01").line_total(), 0.0);
    }

    #[test]
    fn parsed_date_valid() {
        assert_eq!(
            expense(1.0, 1, "2024-02-29").parsed_date(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn parsed_date_tolerates_whitespace() {
        assert_eq!(
            expense(1.0, 1, " 2024-01-05 ").parsed_date(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn parsed_date_invalid() {
        assert_eq!(expense(1.0, 1, "2023-02-29").parsed_date(), None);
        assert_eq!(expense(1.0, 1, "yesterday").parsed_date(), None);
        assert_eq!(expense(1.0, 1, "").parsed_date(), None);
        assert_eq!(parse_date("01/02/2024"), None);
    }

    #[test]
    fn serializes_with_blob_field_names() {
        let json = serde_json::to_value(expense(10.0, 2, "2024-01-01")).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["amount", "category", "date", "id", "quantity", "title"]);
        assert!(obj["amount"].is_number());
        assert!(obj["quantity"].is_number());
        assert!(obj["date"].is_string());
    }

    #[test]
    fn serde_roundtrip_json() {
        let e = expense(12.75, 3, "2024-06-30");
        let json = serde_json::to_string(&e).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }

    #[test]
    fn decodes_integer_amount() {
        let e: Expense = serde_json::from_str(
            r#"{"id":"a","title":"Bus","amount":5,"quantity":1,"category":"Travel","date":"2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(e.amount, 5.0);
        assert_eq!(e.quantity, 1);
    }

    #[test]
    fn coerces_numeric_strings() {
        let e: Expense = serde_json::from_str(
            r#"{"id":"a","title":"Bus","amount":"12.5","quantity":" 3 ","category":"Travel","date":"2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(e.amount, 12.5);
        assert_eq!(e.quantity, 3);
    }

    #[test]
    fn coerces_whole_float_quantity() {
        let e: Expense = serde_json::from_str(
            r#"{"id":"a","title":"Bus","amount":1,"quantity":2.0,"category":"Travel","date":"2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(e.quantity, 2);
    }

    #[test]
    fn floors_fractional_quantity() {
        let e: Expense = serde_json::from_str(
            r#"{"id":"a","title":"Bus","amount":1,"quantity":1.5,"category":"Travel","date":"2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(e.quantity, 1);
    }

    #[test]
    fn clamps_out_of_range_quantity() {
        let e: Expense = serde_json::from_str(
            r#"{"id":"a","title":"Bus","amount":1,"quantity":-4,"category":"Travel","date":"2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(e.quantity, 0);

        let e: Expense = serde_json::from_str(
            r#"{"id":"a","title":"Bus","amount":1,"quantity":1e12,"category":"Travel","date":"2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(e.quantity, u32::MAX);
    }

    #[test]
    fn unreadable_amount_becomes_zero() {
        for amount in [r#""abc""#, "null", r#""12abc""#, r#""inf""#, "{}"] {
            let raw = format!(
                r#"{{"id":"a","title":"Bus","amount":{amount},"quantity":1,"category":"Travel","date":"2024-01-02"}}"#
            );
            let e: Expense = serde_json::from_str(&raw).unwrap();
            assert_eq!(e.amount, 0.0, "{amount}");
            assert_eq!(e.id, "a");
        }
    }

    #[test]
    fn unreadable_quantity_becomes_one() {
        let e: Expense = serde_json::from_str(
            r#"{"id":"a","title":"Bus","amount":2,"quantity":"lots","category":"Travel","date":"2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(e.quantity, 1);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let e: Expense = serde_json::from_str(r#"{"id":"a","title":"Bus"}"#).unwrap();
        assert_eq!(e.amount, 0.0);
        assert_eq!(e.quantity, 1);
        assert_eq!(e.category, "");
        assert_eq!(e.date, "");
    }

    #[test]
    fn non_string_text_fields_are_stringified() {
        let e: Expense = serde_json::from_str(
            r#"{"id":17,"title":null,"amount":1,"quantity":1,"category":true,"date":"2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(e.id, "17");
        assert_eq!(e.title, "");
        assert_eq!(e.category, "true");
    }

    #[test]
    fn coerced_record_reencodes_stably() {
        let e: Expense = serde_json::from_str(
            r#"{"id":"a","title":"Bus","amount":"abc","quantity":2.7,"category":"Travel","date":"2024-01-02"}"#,
        )
        .unwrap();
        let json = serde_json::to_string(&e).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  NewExpense / ExpenseForm
// ═══════════════════════════════════════════════════════════════════

mod inputs {
    use super::*;

    #[test]
    fn new_expense_constructor() {
        let n = NewExpense::new("Tea", 10.0, 2, "Food", "2024-01-01");
        assert_eq!(n.title, "Tea");
        assert_eq!(n.amount, 10.0);
        assert_eq!(n.quantity, 2);
        assert_eq!(n.category, "Food");
        assert_eq!(n.date, "2024-01-01");
    }

    #[test]
    fn form_default_is_blank() {
        let f = ExpenseForm::default();
        assert!(f.title.is_empty());
        assert!(f.amount.is_empty());
        assert!(f.quantity.is_empty());
        assert!(f.category.is_empty());
        assert!(f.date.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SortKey
// ═══════════════════════════════════════════════════════════════════

mod sort_key {
    use super::*;

    #[test]
    fn parses_every_wire_name() {
        let pairs = [
            ("date-desc", SortKey::DateDesc),
            ("date-asc", SortKey::DateAsc),
            ("amount-desc", SortKey::AmountDesc),
            ("amount-asc", SortKey::AmountAsc),
            ("category-asc", SortKey::CategoryAsc),
            ("category-desc", SortKey::CategoryDesc),
        ];
        for (wire, key) in pairs {
            assert_eq!(wire.parse::<SortKey>().unwrap(), key);
            assert_eq!(key.to_string(), wire);
            assert_eq!(key.as_str(), wire);
        }
    }

    #[test]
    fn unknown_key_is_error() {
        let err = "price-desc".parse::<SortKey>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownSortKey(ref k) if k == "price-desc"));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("Date-Desc".parse::<SortKey>().is_err());
    }

    #[test]
    fn lenient_parse_returns_none_for_unknown() {
        assert_eq!(SortKey::parse_lenient("amount-asc"), Some(SortKey::AmountAsc));
        assert_eq!(SortKey::parse_lenient("bogus"), None);
        assert_eq!(SortKey::parse_lenient(""), None);
    }

    #[test]
    fn default_is_newest_first() {
        assert_eq!(SortKey::default(), SortKey::DateDesc);
    }

    #[test]
    fn serde_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&SortKey::CategoryDesc).unwrap(),
            "\"category-desc\""
        );
        let back: SortKey = serde_json::from_str("\"amount-desc\"").unwrap();
        assert_eq!(back, SortKey::AmountDesc);
    }

    #[test]
    fn all_lists_six_distinct_keys() {
        let names: std::collections::HashSet<&str> =
            SortKey::ALL.iter().map(SortKey::as_str).collect();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn labels_are_not_empty() {
        for key in SortKey::ALL {
            assert!(!key.label().is_empty());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CategoryFilter
// ═══════════════════════════════════════════════════════════════════

mod category_filter {
    use super::*;

    #[test]
    fn sentinel_and_empty_mean_all() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
    }

    #[test]
    fn sentinel_is_case_sensitive() {
        assert_eq!(
            CategoryFilter::parse("ALL"),
            CategoryFilter::Category("ALL".into())
        );
    }

    #[test]
    fn other_values_are_categories() {
        assert_eq!(
            CategoryFilter::parse("Food"),
            CategoryFilter::Category("Food".into())
        );
    }

    #[test]
    fn matches_ignoring_case() {
        let f = CategoryFilter::Category("food".into());
        assert!(f.matches("Food"));
        assert!(f.matches("FOOD"));
        assert!(!f.matches("Travel"));
        assert!(!f.matches("Food "));
    }

    #[test]
    fn all_matches_everything() {
        assert!(CategoryFilter::All.matches("anything"));
        assert!(CategoryFilter::All.matches(""));
    }

    #[test]
    fn wire_value_and_label() {
        assert_eq!(CategoryFilter::All.as_str(), "all");
        assert_eq!(CategoryFilter::All.label(), "All Categories");
        let f = CategoryFilter::Category("Travel".into());
        assert_eq!(f.as_str(), "Travel");
        assert_eq!(f.label(), "Travel");
        assert_eq!(f.to_string(), "Travel");
    }

    #[test]
    fn default_is_all() {
        assert_eq!(CategoryFilter::default(), CategoryFilter::All);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Aggregate / Settings
// ═══════════════════════════════════════════════════════════════════

mod aggregate_and_settings {
    use super::*;

    #[test]
    fn aggregate_default_is_zero() {
        let a = Aggregate::default();
        assert_eq!(a.count, 0);
        assert_eq!(a.total, 0.0);
    }

    #[test]
    fn settings_defaults() {
        let s = Settings::default();
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(s.storage_key, "kanha_expenses_v1");
        assert_eq!(s.currency_symbol, DEFAULT_CURRENCY_SYMBOL);
        assert_eq!(s.default_sort, SortKey::DateDesc);
    }

    #[test]
    fn settings_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"currency_symbol":"$"}"#).unwrap();
        assert_eq!(s.currency_symbol, "$");
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(s.default_sort, SortKey::DateDesc);
    }
}
