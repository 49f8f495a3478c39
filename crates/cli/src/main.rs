use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use expense_tracker_core::models::expense::{ExpenseForm, DATE_FORMAT};
use expense_tracker_core::models::view::{CategoryFilter, SortKey};
use expense_tracker_core::services::format_service::ClearAllPrompt;
use expense_tracker_core::ExpenseTracker;
use tracing_subscriber::EnvFilter;

use settings::{Cli, Command, ExportFormat};

mod render;
mod settings;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app_config = settings::load(&cli).context("failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "expense_tracker={level},expense_tracker_core={level}",
            level = app_config.log_level
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::debug!(data_dir = %app_config.data_dir.display(), "opening expense store");
    let mut tracker = ExpenseTracker::open_dir(&app_config.data_dir, app_config.settings());

    match cli.command {
        Command::Add {
            title,
            amount,
            quantity,
            category,
            date,
        } => {
            let form = ExpenseForm {
                title,
                amount,
                quantity,
                category,
                date: date.unwrap_or_else(today),
            };
            let expense = tracker.submit_form(&form)?;
            ensure_saved(&tracker)?;
            println!(
                "Added \"{}\" ({} × {} = {}) [{}]",
                expense.title,
                tracker.formatter().currency(expense.amount),
                expense.quantity,
                tracker.formatter().currency(expense.line_total()),
                expense.id
            );
        }
        Command::List { sort, category } => {
            let sort = match sort {
                Some(raw) => {
                    let key = SortKey::parse_lenient(&raw);
                    if key.is_none() {
                        tracing::warn!("unknown sort key '{raw}', keeping insertion order");
                    }
                    key
                }
                None => Some(tracker.settings().default_sort),
            };
            let view = tracker.view(&CategoryFilter::parse(&category), sort);
            print!("{}", render::table(&view, tracker.formatter()));
        }
        Command::Delete { id, yes } => {
            if tracker.get_expense(&id).is_none() {
                println!("No expense with id {id}.");
                return Ok(());
            }
            if yes || confirm(&tracker.delete_prompt(&id))? {
                tracker.remove_expense(&id);
                ensure_saved(&tracker)?;
                println!("Deleted.");
            }
        }
        Command::Clear { yes } => match tracker.clear_all_prompt() {
            ClearAllPrompt::NothingToClear => {
                println!("{}", ClearAllPrompt::NothingToClear.message());
            }
            prompt @ ClearAllPrompt::Confirm => {
                if yes || confirm(prompt.message())? {
                    tracker.clear_all();
                    ensure_saved(&tracker)?;
                    println!("All expenses cleared.");
                }
            }
        },
        Command::Categories => {
            for option in tracker.categories() {
                println!("{}\t{}", option.as_str(), option.label());
            }
        }
        Command::Export { format } => match format {
            ExportFormat::Json => println!("{}", tracker.export_to_json()?),
            ExportFormat::Csv => print!("{}", tracker.export_to_csv()),
        },
    }

    Ok(())
}

/// Mutations write on their own; a failure there leaves the store unsaved.
fn ensure_saved(tracker: &ExpenseTracker) -> anyhow::Result<()> {
    anyhow::ensure!(
        !tracker.has_unsaved_changes(),
        "failed to save expenses (see the log for the cause)"
    );
    Ok(())
}

fn today() -> String {
    chrono::Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
fn confirm(prompt: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt} [y/N] ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
