// crates/bookstore-cli/src/main.rs
// ============================================================================
// Module: Bookstore CLI Entry Point
// Description: Command dispatcher for seeding the catalog and sales reports.
// Purpose: Provide a localized CLI over the SQLite catalog store.
// Dependencies: clap, bookstore-config, bookstore-core, bookstore-store-sqlite,
// serde, serde_json, thiserror, tracing.
// ============================================================================

//! ## Overview
//! `bookstore report` rebuilds the schema, loads the fixture, asks for a
//! publisher, and prints that publisher's sales. `bookstore seed` stops after
//! loading, and `bookstore config validate` only checks the config file.
//! Running without a subcommand is the same as `bookstore report`.
//!
//! Report output goes to stdout. Prompts, diagnostics, and errors go to
//! stderr. A publisher that does not exist is reported and exits successfully.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use bookstore_cli::i18n::Locale;
use bookstore_cli::i18n::set_locale;
use bookstore_cli::logging;
use bookstore_cli::t;
use bookstore_config::BookstoreConfig;
use bookstore_core::ModelKind;
use bookstore_core::Publisher;
use bookstore_core::PublisherLookup;
use bookstore_core::SaleReportRow;
use bookstore_core::SalesReport;
use bookstore_core::TableCounts;
use bookstore_core::fixture::read_fixture_file;
use bookstore_core::runtime::run_sales_report;
use bookstore_core::runtime::seed_catalog;
use bookstore_store_sqlite::SqliteCatalogStore;
use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::info;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of bytes read from stdin for the publisher token.
const MAX_TOKEN_BYTES: u64 = 4 * 1024;
/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "BOOKSTORE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "bookstore", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `BOOKSTORE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute (defaults to `report`).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rebuild the catalog from the fixture and print a publisher's sales.
    Report(ReportCommand),
    /// Rebuild the catalog from the fixture and print per-table row counts.
    Seed(SeedCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a bookstore configuration file.
    Validate(ConfigValidateCommand),
}

/// Catalog location inputs shared by `report` and `seed`.
#[derive(Args, Debug, Clone, Default)]
struct CatalogArgs {
    /// Optional config file path (defaults to bookstore.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Optional `SQLite` database path or `:memory:` (overrides config).
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,
    /// Optional fixture JSON path (overrides config).
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,
}

/// Arguments for `report`.
#[derive(Args, Debug, Default)]
struct ReportCommand {
    /// Catalog location settings.
    #[command(flatten)]
    catalog: CatalogArgs,
    /// Publisher id or exact name (prompts on stdin when omitted).
    #[arg(long, value_name = "TOKEN")]
    publisher: Option<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `seed`.
#[derive(Args, Debug)]
struct SeedCommand {
    /// Catalog location settings.
    #[command(flatten)]
    catalog: CatalogArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to bookstore.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Output formats for report and seed commands.
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON document output.
    Json,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Russian.
    Ru,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ru => Self::Ru,
        }
    }
}

// ============================================================================
// SECTION: Output Types
// ============================================================================

/// JSON document emitted by `report --format json`.
#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    /// Resolved publisher, or null when not found.
    publisher: Option<&'a Publisher>,
    /// Report rows in date order.
    sales: &'a [SaleReportRow],
    /// Number of rows.
    count: usize,
}

impl<'a> ReportOutput<'a> {
    /// Builds the JSON view of an optional report.
    fn new(report: Option<&'a SalesReport>) -> Self {
        match report {
            Some(report) => Self {
                publisher: Some(&report.publisher),
                sales: &report.sales,
                count: report.count(),
            },
            None => Self {
                publisher: None,
                sales: &[],
                count: 0,
            },
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command.unwrap_or_else(|| Commands::Report(ReportCommand::default())) {
        Commands::Report(command) => command_report(command),
        Commands::Seed(command) => command_seed(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Catalog Commands
// ============================================================================

/// Executes the `report` command.
fn command_report(command: ReportCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.catalog)?;
    let (store, _) = prepare_catalog(&config)?;
    let token = match command.publisher {
        Some(token) => token,
        None => prompt_publisher(&mut std::io::stdin().lock())?,
    };
    let lookup = PublisherLookup::parse(&token);
    debug!(%lookup, "resolving publisher");
    let report = run_sales_report(&store, &lookup)
        .map_err(|err| CliError::new(t!("report.query_failed", error = err)))?;
    match command.format {
        OutputFormat::Text => {
            for line in render_report_text(report.as_ref()) {
                write_stdout_line(&line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
        OutputFormat::Json => write_json(&ReportOutput::new(report.as_ref()))?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `seed` command.
fn command_seed(command: &SeedCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.catalog)?;
    let (_, counts) = prepare_catalog(&config)?;
    match command.format {
        OutputFormat::Text => {
            for line in render_counts(&counts) {
                write_stdout_line(&line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
            write_stdout_line(&t!(
                "seed.summary",
                total = counts.total(),
                path = config.database.path.display()
            ))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        OutputFormat::Json => write_json(&counts)?,
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = BookstoreConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Catalog Helpers
// ============================================================================

/// Loads config, applies CLI overrides, and installs logging.
fn load_config(args: &CatalogArgs) -> CliResult<BookstoreConfig> {
    let mut config = BookstoreConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    apply_overrides(&mut config, args);
    config.validate().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    logging::init(&config.logging.level)
        .map_err(|err| CliError::new(t!("logging.init_failed", error = err)))?;
    Ok(config)
}

/// Applies `--database` and `--fixture` overrides to a loaded config.
fn apply_overrides(config: &mut BookstoreConfig, args: &CatalogArgs) {
    if let Some(path) = &args.database {
        config.database.path.clone_from(path);
    }
    if let Some(path) = &args.fixture {
        config.fixture.path.clone_from(path);
    }
}

/// Reads the fixture, opens the store, and rebuilds the catalog.
///
/// The fixture is parsed before the schema is reset so a bad fixture leaves
/// an existing database untouched.
fn prepare_catalog(config: &BookstoreConfig) -> CliResult<(SqliteCatalogStore, TableCounts)> {
    let fixture_path = &config.fixture.path;
    let records = read_fixture_file(fixture_path).map_err(|err| {
        CliError::new(t!("fixture.load_failed", path = fixture_path.display(), error = err))
    })?;
    debug!(path = %fixture_path.display(), records = records.len(), "fixture parsed");
    let mut store = SqliteCatalogStore::open(&config.database).map_err(|err| {
        CliError::new(t!("store.open_failed", path = config.database.path.display(), error = err))
    })?;
    let counts = seed_catalog(&mut store, &records)
        .map_err(|err| CliError::new(t!("store.seed_failed", error = err)))?;
    info!(
        database = %config.database.path.display(),
        total = counts.total(),
        "catalog seeded"
    );
    Ok((store, counts))
}

/// Prompts on stderr and reads one publisher token line from `input`.
fn prompt_publisher(input: &mut impl BufRead) -> CliResult<String> {
    write_stderr_prompt(&format!("{}: ", t!("report.prompt")))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    read_token(input).map_err(|err| CliError::new(t!("input.read_failed", error = err)))
}

/// Reads one bounded line and strips the line terminator.
///
/// A character split by the byte cap is dropped rather than failing the read.
fn read_token(input: &mut impl BufRead) -> std::io::Result<String> {
    let mut bytes = Vec::new();
    input.take(MAX_TOKEN_BYTES).read_until(b'\n', &mut bytes)?;
    while bytes.last().is_some_and(|byte| matches!(byte, b'\n' | b'\r')) {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(line) => Ok(line),
        Err(err) if err.utf8_error().error_len().is_none() => {
            let valid = err.utf8_error().valid_up_to();
            let mut bytes = err.into_bytes();
            bytes.truncate(valid);
            String::from_utf8(bytes)
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
        }
        Err(err) => Err(std::io::Error::new(std::io::ErrorKind::InvalidData, err)),
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a report as text lines, or the not-found message.
fn render_report_text(report: Option<&SalesReport>) -> Vec<String> {
    let Some(report) = report else {
        return vec![t!("report.not_found")];
    };
    let mut lines = report.lines();
    lines.push(t!("report.summary", count = report.count(), name = report.publisher.name));
    lines
}

/// Renders per-table row counts in schema order.
fn render_counts(counts: &TableCounts) -> Vec<String> {
    ModelKind::ALL
        .iter()
        .map(|kind| t!("seed.table", table = kind.as_str(), count = counts.get(*kind)))
        .collect()
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a value as pretty JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a prompt to stderr without a trailing newline.
fn write_stderr_prompt(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    write!(&mut stderr, "{message}")?;
    stderr.flush()
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
