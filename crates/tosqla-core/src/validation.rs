use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::schema::DatabaseSchema;
use crate::ENGINE;

/// Validate internal consistency of a schema snapshot.
///
/// This checks:
/// - the snapshot targets the supported engine
/// - duplicate tables/columns/index names
/// - index columns exist
/// - enum and set columns declare at least one value
pub fn validate_schema(schema: &DatabaseSchema) -> Result<()> {
    if !schema.engine.eq_ignore_ascii_case(ENGINE) {
        return Err(Error::Unsupported(format!(
            "engine '{}' (only {ENGINE} snapshots are supported)",
            schema.engine
        )));
    }

    let mut tables = BTreeSet::new();
    for table in &schema.tables {
        if !tables.insert(table.name.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate table name: {}",
                table.name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in &table.columns {
            if !columns.insert(column.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }

            let data_type = column.column_type.data_type.to_ascii_lowercase();
            if matches!(data_type.as_str(), "enum" | "set") && column.column_type.values.is_empty()
            {
                return Err(Error::InvalidSchema(format!(
                    "{data_type} column without values: {}.{}",
                    table.name, column.name
                )));
            }
        }

        let mut indexes = BTreeSet::new();
        for index in &table.indexes {
            if !indexes.insert(index.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate index name: {}.{}",
                    table.name, index.name
                )));
            }
            for column in &index.columns {
                if !columns.contains(column.as_str()) {
                    return Err(Error::InvalidSchema(format!(
                        "index column not found: {}.{} ({})",
                        table.name, column, index.name
                    )));
                }
            }
        }
    }

    Ok(())
}
