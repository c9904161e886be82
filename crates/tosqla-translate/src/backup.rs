//! Derived "backup" tables with a fresh surrogate key.

use tosqla_core::{Column, ColumnType, Index, Table};
use tracing::debug;

/// Name of the index that keeps lookups on the former primary key fast.
pub const BACKUP_INDEX_NAME: &str = "fk_index";
/// Default name of the surrogate key column.
pub const DEFAULT_BACKUP_KEY: &str = "id";
/// Default postfix appended to backup table names.
pub const DEFAULT_BACKUP_POSTFIX: &str = "_backup";

const COLLISION_SUFFIX: char = '_';

/// Build the backup schema of `source` under the table name `name`.
///
/// The result gets a new integer primary key named `key_name` (suffixed with
/// `_` until it clashes with no source column). Former key columns become
/// ordinary columns listed first and are covered by a non-unique
/// [`BACKUP_INDEX_NAME`] index; source indexes and options are copied as is.
pub fn backup_table(source: &Table, name: &str, key_name: &str) -> Table {
    let (former_key, rest): (Vec<&Column>, Vec<&Column>) = source
        .columns
        .iter()
        .partition(|column| column.is_primary_key);

    let key_name = resolve_name(key_name, |candidate| source.column(candidate).is_some());

    let mut columns = Vec::with_capacity(source.columns.len() + 1);
    columns.push(Column::primary_key(key_name.clone(), ColumnType::new("int")));
    columns.extend(former_key.iter().map(|column| Column {
        is_primary_key: false,
        ..(*column).clone()
    }));
    columns.extend(rest.into_iter().cloned());

    let mut indexes = Vec::with_capacity(source.indexes.len() + 1);
    if !former_key.is_empty() {
        let index_name = resolve_name(BACKUP_INDEX_NAME, |candidate| {
            source.indexes.iter().any(|index| index.name == candidate)
        });
        indexes.push(Index::new(
            index_name,
            former_key.iter().map(|column| column.name.clone()),
            false,
        ));
    }
    indexes.extend(source.indexes.iter().cloned());

    debug!(
        source = %source.name,
        table = %name,
        key = %key_name,
        former_key = former_key.len(),
        "built backup table"
    );

    Table {
        name: name.to_string(),
        columns,
        indexes,
        options: source.options.clone(),
    }
}

/// Backup every table under `<name><postfix>`, keeping the input order.
pub fn backup_tables(tables: &[Table], postfix: &str, key_name: &str) -> Vec<Table> {
    tables
        .iter()
        .map(|table| backup_table(table, &format!("{}{postfix}", table.name), key_name))
        .collect()
}

fn resolve_name(candidate: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut name = candidate.to_string();
    while is_taken(&name) {
        name.push(COLLISION_SUFFIX);
    }
    name
}

#[cfg(test)]
mod tests {
    use tosqla_core::TableOptions;

    use super::*;

    fn orders() -> Table {
        Table {
            name: "orders".to_string(),
            columns: vec![
                Column::primary_key("order_id", ColumnType::new("int")),
                Column::new("customer_id", ColumnType::new("int")),
            ],
            indexes: Vec::new(),
            options: TableOptions {
                charset: Some("utf8mb4".to_string()),
                collation: None,
                engine: Some("InnoDB".to_string()),
            },
        }
    }

    fn names(table: &Table) -> Vec<&str> {
        table.columns.iter().map(|column| column.name.as_str()).collect()
    }

    #[test]
    fn prepends_surrogate_key_and_demotes_old_key() {
        let backup = backup_table(&orders(), "orders_backup", "id");

        assert_eq!(backup.name, "orders_backup");
        assert_eq!(names(&backup), vec!["id", "order_id", "customer_id"]);

        let id = &backup.columns[0];
        assert!(id.is_primary_key);
        assert!(!id.is_nullable);
        assert_eq!(id.column_type, ColumnType::new("int"));

        assert!(backup.columns[1..].iter().all(|column| !column.is_primary_key));
        assert_eq!(
            backup.indexes,
            vec![Index::new(BACKUP_INDEX_NAME, ["order_id"], false)]
        );
        assert_eq!(backup.options, orders().options);
    }

    #[test]
    fn key_name_collisions_are_suffixed() {
        let mut source = orders();
        source.columns.push(Column::new("id", ColumnType::new("int")));
        assert_eq!(backup_table(&source, "b", "id").columns[0].name, "id_");

        source.columns.push(Column::new("id_", ColumnType::new("int")));
        assert_eq!(backup_table(&source, "b", "id").columns[0].name, "id__");
    }

    #[test]
    fn former_key_columns_come_first() {
        let source = Table {
            name: "lines".to_string(),
            columns: vec![
                Column::new("note", ColumnType::new("text")),
                Column::primary_key("order_id", ColumnType::new("int")),
                Column::new("qty", ColumnType::new("int")),
                Column::primary_key("line_no", ColumnType::new("int")),
            ],
            indexes: vec![Index::new("ix_qty_note", ["qty", "note"], true)],
            options: TableOptions::default(),
        };

        let backup = backup_table(&source, "lines_backup", "id");
        assert_eq!(
            names(&backup),
            vec!["id", "order_id", "line_no", "note", "qty"]
        );
        assert_eq!(
            backup.indexes,
            vec![
                Index::new(BACKUP_INDEX_NAME, ["order_id", "line_no"], false),
                Index::new("ix_qty_note", ["qty", "note"], true),
            ]
        );
    }

    #[test]
    fn table_without_key_gets_no_backup_index() {
        let source = Table {
            name: "log".to_string(),
            columns: vec![Column::new("line", ColumnType::new("text"))],
            indexes: Vec::new(),
            options: TableOptions::default(),
        };
        let backup = backup_table(&source, "log_backup", "id");
        assert_eq!(names(&backup), vec!["id", "line"]);
        assert!(backup.indexes.is_empty());
    }

    #[test]
    fn existing_backup_index_name_is_not_reused() {
        let mut source = orders();
        source
            .indexes
            .push(Index::new(BACKUP_INDEX_NAME, ["customer_id"], false));

        let backup = backup_table(&source, "orders_backup", "id");
        assert_eq!(backup.indexes[0].name, "fk_index_");
        assert_eq!(backup.indexes[1].name, "fk_index");
    }

    #[test]
    fn backs_up_every_table_with_postfix() {
        let backups = backup_tables(&[orders()], DEFAULT_BACKUP_POSTFIX, DEFAULT_BACKUP_KEY);
        assert_eq!(backups.len(), 1);
        assert_eq!(backups[0].name, "orders_backup");
    }
}
