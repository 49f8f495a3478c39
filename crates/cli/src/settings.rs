use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use expense_tracker_core::models::settings::{
    Settings, DEFAULT_CURRENCY_SYMBOL, DEFAULT_STORAGE_KEY,
};
use expense_tracker_core::models::view::SortKey;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/expense-tracker.toml";
const ENV_PREFIX: &str = "EXPENSE_TRACKER";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub currency_symbol: String,
    pub default_sort: SortKey,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            default_sort: SortKey::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    pub fn settings(&self) -> Settings {
        Settings {
            storage_key: self.storage_key.clone(),
            currency_symbol: self.currency_symbol.clone(),
            default_sort: self.default_sort,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "expense-tracker", version, about = "Record expenses and view running totals")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the directory holding the expenses file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Override the currency symbol used for display.
    #[arg(long, global = true)]
    pub currency: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new expense.
    Add {
        #[arg(long)]
        title: String,
        /// Unit amount, e.g. 12.50
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        quantity: String,
        #[arg(long)]
        category: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Show expenses with count and total.
    List {
        /// date-desc, date-asc, amount-desc, amount-asc, category-asc, category-desc
        #[arg(long)]
        sort: Option<String>,
        /// A category, or "all"
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Delete one expense by id.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Delete every expense.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// List the categories in use.
    Categories,
    /// Print all expenses in a portable format.
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

/// File, then environment, then command-line flags.
pub fn load(cli: &Cli) -> Result<AppConfig, config::ConfigError> {
    load_with_env(cli, config::Environment::with_prefix(ENV_PREFIX))
}

fn load_with_env(cli: &Cli, env: config::Environment) -> Result<AppConfig, config::ConfigError> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(env);
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_dir) = &cli.data_dir {
        settings.data_dir = data_dir.clone();
    }
    if let Some(currency) = &cli.currency {
        settings.currency_symbol = currency.clone();
    }

    Ok(settings)
}
