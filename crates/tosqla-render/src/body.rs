use tosqla_core::Index;
use tosqla_translate::model::quote;
use tosqla_translate::{ColumnRecord, TableRecord};

const INDENT: &str = "    ";

/// Enum/set definitions followed by the model class of one table.
pub fn render_table(record: &TableRecord) -> Vec<String> {
    let mut lines = Vec::new();

    if !record.type_definitions.is_empty() {
        for (name, definition) in &record.type_definitions {
            lines.push(format!("{name} = {definition}"));
        }
        lines.push(String::new());
        lines.push(String::new());
    }

    lines.push(format!("class {}(Base):", record.model));

    let mut body = Vec::new();
    if record.is_abstract {
        body.push("__abstract__ = True".to_string());
    }
    if record.with_tablename {
        body.push(format!("__tablename__ = {}", quote(&record.name)));
    }
    body.extend(table_args(record));

    if !record.columns.is_empty() {
        if !body.is_empty() {
            body.push(String::new());
        }
        body.extend(record.columns.iter().map(column_line));
    }

    if body.is_empty() {
        body.push("pass".to_string());
    }

    lines.extend(body.into_iter().map(|line| {
        if line.is_empty() {
            line
        } else {
            format!("{INDENT}{line}")
        }
    }));
    lines
}

fn table_args(record: &TableRecord) -> Vec<String> {
    let mut options = Vec::new();
    if let Some(charset) = &record.options.charset {
        options.push(format!("\"mysql_charset\": {}", quote(charset)));
    }
    if let Some(collation) = &record.options.collation {
        options.push(format!("\"mysql_collate\": {}", quote(collation)));
    }
    if let Some(engine) = &record.options.engine {
        options.push(format!("\"mysql_engine\": {}", quote(engine)));
    }
    let options = (!options.is_empty()).then(|| format!("{{{}}}", options.join(", ")));

    match (record.indexes.is_empty(), options) {
        (true, None) => Vec::new(),
        (true, Some(options)) => vec![format!("__table_args__ = {options}")],
        (false, options) => {
            let mut lines = vec!["__table_args__ = (".to_string()];
            lines.extend(
                record
                    .indexes
                    .iter()
                    .map(|index| format!("{INDENT}{},", index_expr(index))),
            );
            if let Some(options) = options {
                lines.push(format!("{INDENT}{options},"));
            }
            lines.push(")".to_string());
            lines
        }
    }
}

fn index_expr(index: &Index) -> String {
    let mut args = vec![quote(&index.name)];
    args.extend(index.columns.iter().map(|column| quote(column)));
    if index.is_unique {
        args.push("unique=True".to_string());
    }
    format!("Index({})", args.join(", "))
}

fn column_line(column: &ColumnRecord) -> String {
    let mut args = Vec::new();
    if column.field_name != column.name {
        args.push(quote(&column.name));
    }
    args.push(column.type_expr.clone());
    if column.primary_key {
        args.push("primary_key=True".to_string());
    }
    if column.index {
        args.push("index=True".to_string());
    }
    if column.unique {
        args.push("unique=True".to_string());
    }
    if let Some(default) = &column.server_default {
        args.push(format!("server_default={default}"));
    }

    format!(
        "{}: Mapped[{}] = mapped_column({})",
        column.field_name,
        column.semantic_type,
        args.join(", ")
    )
}
