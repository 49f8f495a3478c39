use expense_tracker_core::models::view::ExpenseView;
use expense_tracker_core::services::format_service::FormatService;

const HEADERS: [&str; 7] = ["Title", "Category", "Amount", "Qty", "Total", "Date", "ID"];

/// Render a view as a padded text table followed by the summary line.
pub fn table(view: &ExpenseView, fmt: &FormatService) -> String {
    let rows: Vec<[String; 7]> = view
        .rows
        .iter()
        .map(|e| {
            [
                e.title.clone(),
                e.category.clone(),
                fmt.currency(e.amount),
                e.quantity.to_string(),
                fmt.currency(e.line_total()),
                fmt.date(&e.date),
                e.id.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    if rows.is_empty() {
        out.push_str("(no expenses)\n");
    }

    out.push('\n');
    out.push_str(&summary(view, fmt));
    out.push('\n');
    out
}

pub fn summary(view: &ExpenseView, fmt: &FormatService) -> String {
    format!(
        "Expenses: {}  Total: {}  (filter: {}, sort: {})",
        view.aggregate.count,
        fmt.currency(view.aggregate.total),
        view.filter.label(),
        view.sort.map_or("insertion order", |s| s.label()),
    )
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
