mod logging;
mod output;
mod run;
mod settings;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tosqla_core::Error as CoreError;
use tosqla_translate::{TranslateError, TranslateOptions};
use uuid::Uuid;

use logging::init_logging;
use output::emit;
use run::{BackupSpec, OutputFormat, RunSpec, generate, load_snapshot};
use settings::{DEFAULT_SETTINGS_FILE, Settings, SettingsError, load_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "tosqla",
    version,
    about = "Generate SQLAlchemy models from MySQL schema snapshots"
)]
struct Cli {
    /// Settings file (defaults to ./tosqla.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one model per table.
    Models(ModelsArgs),
    /// Generate backup models with a surrogate primary key.
    Backups(BackupsArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Schema snapshot (schema.json).
    #[arg(long, value_name = "FILE")]
    schema: PathBuf,
    /// Mark generated models abstract.
    #[arg(long = "abstract", default_value_t = false)]
    abstract_models: bool,
    /// Output file; stdout when omitted.
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Python)]
    format: OutputFormat,
    /// Import `Base` from this module instead of declaring it.
    #[arg(long, value_name = "MODULE")]
    base_module: Option<String>,
    /// Tables to generate; all tables when omitted.
    #[arg(value_name = "TABLE")]
    tables: Vec<String>,
}

#[derive(Args, Debug)]
struct ModelsArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Emit `__tablename__` on every model.
    #[arg(short = 'w', long, default_value_t = false)]
    with_tablename: bool,
}

#[derive(Args, Debug)]
struct BackupsArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Postfix appended to backup table names.
    #[arg(long, value_name = "POSTFIX")]
    postfix: Option<String>,
    /// Name of the surrogate primary key column.
    #[arg(long, value_name = "NAME")]
    pk: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_json) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> Result<(), CliError> {
    let settings = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(CliError::InvalidConfig(format!(
                "settings file not found: {}",
                path.display()
            )));
        }
        Some(path) => load_settings(path)?,
        None => load_settings(Path::new(DEFAULT_SETTINGS_FILE))?,
    };

    let run_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!("run", run_id = %run_id);
    let _guard = span.enter();

    let (command, common, spec) = match cli.command {
        Command::Models(args) => {
            let spec = resolve_models(&args, &settings, run_id);
            ("models", args.common, spec)
        }
        Command::Backups(args) => {
            let spec = resolve_backups(&args, &settings, run_id)?;
            ("backups", args.common, spec)
        }
    };

    tracing::info!(event = "run_started", command, schema = %common.schema.display());
    let timer = Instant::now();

    let schema = load_snapshot(&common.schema)?;
    let text = generate(&schema, &spec)?;
    emit(common.out.as_deref(), &text)?;

    if let Some(out) = &common.out {
        tracing::info!(event = "output_written", path = %out.display());
    }
    tracing::info!(
        event = "run_finished",
        status = "success",
        duration_ms = timer.elapsed().as_millis()
    );

    Ok(())
}

fn resolve_common(common: &CommonArgs, settings: &Settings, run_id: String) -> RunSpec {
    RunSpec {
        run_id,
        started_at: chrono::Utc::now(),
        tables: common.tables.clone(),
        translate: TranslateOptions {
            abstract_models: common.abstract_models || settings.abstract_models,
            with_tablename: settings.with_tablename,
        },
        backup: None,
        base_module: common
            .base_module
            .clone()
            .or_else(|| settings.base_module.clone()),
        format: common.format,
    }
}

fn resolve_models(args: &ModelsArgs, settings: &Settings, run_id: String) -> RunSpec {
    let mut spec = resolve_common(&args.common, settings, run_id);
    spec.translate.with_tablename |= args.with_tablename;
    spec
}

fn resolve_backups(
    args: &BackupsArgs,
    settings: &Settings,
    run_id: String,
) -> Result<RunSpec, CliError> {
    let postfix = args
        .postfix
        .clone()
        .unwrap_or_else(|| settings.backup_postfix.clone());
    let key = args.pk.clone().unwrap_or_else(|| settings.backup_key.clone());

    if postfix.is_empty() {
        return Err(CliError::InvalidConfig(
            "backup postfix must not be empty".to_string(),
        ));
    }
    if key.is_empty() {
        return Err(CliError::InvalidConfig(
            "backup key name must not be empty".to_string(),
        ));
    }

    let mut spec = resolve_common(&args.common, settings, run_id);
    spec.backup = Some(BackupSpec { postfix, key });
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_settings() {
        let cli = parse(&["tosqla", "models", "--schema", "s.json", "-w", "--abstract", "users"]);
        let Command::Models(args) = cli.command else {
            panic!("expected models command");
        };

        let spec = resolve_models(&args, &Settings::default(), "run".to_string());
        assert!(spec.translate.with_tablename);
        assert!(spec.translate.abstract_models);
        assert_eq!(spec.tables, vec!["users"]);
        assert!(spec.backup.is_none());
    }

    #[test]
    fn settings_fill_in_missing_flags() {
        let cli = parse(&["tosqla", "backups", "--schema", "s.json", "--pk", "row_id"]);
        let Command::Backups(args) = cli.command else {
            panic!("expected backups command");
        };

        let settings = Settings {
            with_tablename: true,
            backup_postfix: "_old".to_string(),
            base_module: Some("app.db".to_string()),
            ..Settings::default()
        };
        let spec = resolve_backups(&args, &settings, "run".to_string()).expect("resolve");
        assert_eq!(
            spec.backup,
            Some(BackupSpec {
                postfix: "_old".to_string(),
                key: "row_id".to_string(),
            })
        );
        assert!(spec.translate.with_tablename);
        assert_eq!(spec.base_module.as_deref(), Some("app.db"));
        assert_eq!(spec.format, OutputFormat::Python);
    }

    #[test]
    fn empty_backup_postfix_is_rejected() {
        let cli = parse(&["tosqla", "backups", "--schema", "s.json", "--postfix", ""]);
        let Command::Backups(args) = cli.command else {
            panic!("expected backups command");
        };
        let err = resolve_backups(&args, &Settings::default(), "run".to_string())
            .expect_err("empty postfix");
        assert!(matches!(err, CliError::InvalidConfig(_)));
    }

    #[test]
    fn json_format_is_selectable() {
        let cli = parse(&[
            "tosqla",
            "--log-json",
            "models",
            "--schema",
            "s.json",
            "--format",
            "json",
        ]);
        assert!(cli.log_json);
        let Command::Models(args) = cli.command else {
            panic!("expected models command");
        };
        assert_eq!(args.common.format, OutputFormat::Json);
    }
}
