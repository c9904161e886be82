use jsonschema::JSONSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::schema::DatabaseSchema;

/// Emit the JSON Schema for `schema.json` snapshots.
pub fn schema_json_schema() -> RootSchema {
    schema_for!(DatabaseSchema)
}

/// Check a snapshot document against the snapshot JSON Schema.
///
/// Returns one message per violation, prefixed with the offending JSON pointer.
pub fn check_snapshot_json(snapshot: &Value) -> Result<Vec<String>> {
    let schema = serde_json::to_value(schema_json_schema())?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| Error::InvalidSchema(err.to_string()))?;

    let violations = match compiled.validate(snapshot) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|error| {
                let path = error.instance_path.to_string();
                let path = if path.is_empty() { "/".to_string() } else { path };
                format!("{path}: {error}")
            })
            .collect(),
    };

    Ok(violations)
}

/// Parse a snapshot document, rejecting anything the JSON Schema disallows.
pub fn parse_snapshot(text: &str) -> Result<DatabaseSchema> {
    let value: Value = serde_json::from_str(text)?;
    let violations = check_snapshot_json(&value)?;
    if !violations.is_empty() {
        return Err(Error::InvalidSchema(violations.join("; ")));
    }
    Ok(serde_json::from_value(value)?)
}
