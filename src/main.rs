use anyhow::Result;
use clap::{Parser, Subcommand};
use food_additives::config::AppConfig;
use food_additives::errors::error_logging;
use food_additives::localization;
use food_additives::observability;
use food_additives::reference_table::ReferenceTable;
use food_additives::report::{render_scale, render_table, OutputFormat, Report};
use food_additives::text_processing::AdditiveMatcher;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "food-additives")]
#[command(about = "Find food additives in an ingredient list and rate their harmfulness", long_about = None)]
struct Cli {
    /// Reference table file (defaults to ADDITIVES_TABLE_PATH, then the bundled table)
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Message language (en, fr)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Print collected Prometheus metrics to stderr on exit
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze ingredient text (read from stdin when TEXT is omitted)
    Analyze {
        /// Ingredient list, e.g. "sugar, E 621, citric acid"
        text: Option<String>,
    },
    /// Show the harmfulness scale
    Scale,
    /// List the reference table
    Table,
}

/// Load the configured table, falling back to an empty one
fn load_table(config: &AppConfig) -> ReferenceTable {
    match config.table.load() {
        Ok(table) => table,
        Err(e) => {
            let path = config.table.path.as_ref().map(|p| p.display().to_string());
            error_logging::log_load_error(&e, "load_reference_table", path.as_deref());
            warn!("Continuing without reference data");
            ReferenceTable::default()
        }
    }
}

fn read_input(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| anyhow::anyhow!("Failed to read ingredient text from stdin: {}", e))?;
            Ok(input)
        }
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(table) = cli.table {
        config.table.path = Some(table);
    }

    let localization_manager = localization::create_localization_manager()?;
    let requested_language = cli.lang.unwrap_or_else(|| config.language.clone());
    config.language = localization_manager.detect_language(Some(requested_language.as_str()));

    config.validate().map_err(|e| {
        error_logging::log_config_error(&e, "app_config", "validate");
        anyhow::anyhow!("Configuration validation failed: {}", e)
    })?;

    let metrics_handle = observability::init_observability_with_config(&config.observability)?;
    if !requested_language.trim().to_lowercase().starts_with(&config.language) {
        warn!(requested = %requested_language, using = %config.language, "Unsupported language, falling back");
    }
    info!("{}", config.summary());

    let output = match cli.command {
        Commands::Analyze { text } => {
            let input = read_input(text)?;
            let table = load_table(&config);
            let matcher = AdditiveMatcher::with_config(config.matcher.clone())?;
            let outcome = matcher.analyze(&input, &table);
            Report::build(&outcome, &table, &config.language, &localization_manager)
                .render(cli.format, &localization_manager)?
        }
        Commands::Scale => render_scale(&config.language, cli.format, &localization_manager)?,
        Commands::Table => {
            let table = load_table(&config);
            render_table(&table, &config.language, cli.format, &localization_manager)?
        }
    };

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }

    if cli.print_metrics {
        match metrics_handle {
            Some(handle) => eprintln!("{}", handle.render()),
            None => warn!("Metrics are disabled, nothing to print"),
        }
    }

    Ok(())
}
