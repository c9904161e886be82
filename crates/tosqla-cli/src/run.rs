use std::path::Path;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use tosqla_core::{DatabaseSchema, SCHEMA_VERSION, Table, parse_snapshot, validate_schema};
use tosqla_render::{RenderOptions, render_module};
use tosqla_translate::{
    GenerationContext, Imports, TableRecord, TranslateOptions, Translator, backup_tables,
};

use crate::CliError;

/// What a generation run writes out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// SQLAlchemy declarative module.
    #[default]
    Python,
    /// Translated records and imports as JSON.
    Json,
}

/// Resolved inputs of one `models` or `backups` invocation.
#[derive(Debug, Clone)]
pub struct RunSpec {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub tables: Vec<String>,
    pub translate: TranslateOptions,
    pub backup: Option<BackupSpec>,
    pub base_module: Option<String>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSpec {
    pub postfix: String,
    pub key: String,
}

/// JSON document written for `--format json`.
#[derive(Debug, Serialize)]
pub struct GenerationReport<'a> {
    pub run_id: &'a str,
    pub generated_at: String,
    pub schema_version: &'static str,
    pub imports: &'a Imports,
    pub tables: &'a [TableRecord],
}

pub fn load_snapshot(path: &Path) -> Result<DatabaseSchema, CliError> {
    let text = std::fs::read_to_string(path)?;
    let schema = parse_snapshot(&text)?;
    validate_schema(&schema)?;
    tracing::info!(
        event = "snapshot_loaded",
        path = %path.display(),
        tables = schema.tables.len()
    );
    Ok(schema)
}

/// Pick the requested tables (all when `names` is empty), sorted by name.
pub fn select_tables(schema: &DatabaseSchema, names: &[String]) -> Result<Vec<Table>, CliError> {
    let mut tables = if names.is_empty() {
        schema.tables.clone()
    } else {
        let mut picked = Vec::with_capacity(names.len());
        for name in names {
            let table = schema
                .table(name)
                .ok_or_else(|| CliError::UnknownTable(name.clone()))?;
            if !picked.iter().any(|seen: &Table| seen.name == table.name) {
                picked.push(table.clone());
            }
        }
        picked
    };
    tables.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tables)
}

/// Translate and render the selected tables of `schema`.
pub fn generate(schema: &DatabaseSchema, spec: &RunSpec) -> Result<String, CliError> {
    let mut tables = select_tables(schema, &spec.tables)?;
    if let Some(backup) = &spec.backup {
        tables = backup_tables(&tables, &backup.postfix, &backup.key);
        tracing::info!(
            event = "backups_derived",
            tables = tables.len(),
            postfix = %backup.postfix,
            key = %backup.key
        );
    }

    let mut ctx = GenerationContext::new();
    let records = Translator::new(spec.translate).translate_tables(&tables, &mut ctx)?;

    match spec.format {
        OutputFormat::Python => {
            let options = RenderOptions {
                generated_at: Some(spec.started_at),
                base_module: spec.base_module.clone(),
            };
            Ok(render_module(&records, &ctx, &options))
        }
        OutputFormat::Json => {
            let report = GenerationReport {
                run_id: &spec.run_id,
                generated_at: spec.started_at.to_rfc3339(),
                schema_version: SCHEMA_VERSION,
                imports: ctx.imports(),
                tables: &records,
            };
            let mut text = serde_json::to_string_pretty(&report)?;
            text.push('\n');
            Ok(text)
        }
    }
}
