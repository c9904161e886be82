//! Identifier normalization for generated model source.

use std::sync::OnceLock;

use regex::Regex;

use crate::typemap::{CORE_SYMBOLS, DIALECT_SYMBOLS};

/// Python keywords plus attribute names the declarative base reserves.
const RESERVED_FIELDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "metadata", "nonlocal", "not", "or", "pass", "raise",
    "registry", "return", "try", "while", "with", "yield",
];

/// Declarative names a generated module binds or commonly imports.
const DECLARATIVE_SYMBOLS: &[&str] = &[
    "Base", "Column", "DeclarativeBase", "Mapped", "MetaData", "Table", "mapped_column",
];

const DIGITS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    // `_`, ASCII space through `)`, and `/`.
    SEPARATORS.get_or_init(|| Regex::new(r"[ -)/_]+").expect("separator pattern is valid"))
}

/// Physical column name to a safe Python attribute name.
pub fn field_identifier(name: &str) -> String {
    let mut field = separators().replace_all(name, "_").into_owned();

    if RESERVED_FIELDS.contains(&field.as_str()) {
        field.push('_');
    }

    if let Some(digit) = field.chars().next().and_then(|ch| ch.to_digit(10)) {
        field.replace_range(..1, DIGITS[digit as usize]);
    }

    field
}

/// Physical table name to a model class name.
///
/// `order_items` becomes `OrderItem`; one trailing `s` is dropped as a naive
/// singular form.
pub fn model_identifier(name: &str) -> String {
    let mut model: String = name
        .split('_')
        .filter(|piece| !piece.is_empty())
        .map(capitalize)
        .collect();

    if model.ends_with('s') && !model.ends_with("ss") {
        model.pop();
    }

    let mut model = model.replace('.', "_");
    if is_module_symbol(&model) {
        model.push_str("Class");
    }
    model
}

/// Whether `name` is already bound at the top level of a generated module.
pub fn is_module_symbol(name: &str) -> bool {
    [DECLARATIVE_SYMBOLS, CORE_SYMBOLS, DIALECT_SYMBOLS]
        .iter()
        .any(|symbols| symbols.contains(&name))
}

fn capitalize(piece: &str) -> String {
    let mut chars = piece.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(field_identifier("order id"), "order_id");
        assert_eq!(field_identifier("price (net)/unit"), "price_net_unit");
        assert_eq!(field_identifier("a__b"), "a_b");
        assert_eq!(field_identifier("plain"), "plain");
    }

    #[test]
    fn escapes_keywords() {
        assert_eq!(field_identifier("class"), "class_");
        assert_eq!(field_identifier("from"), "from_");
        assert_eq!(field_identifier("metadata"), "metadata_");
        assert_eq!(field_identifier("classes"), "classes");
    }

    #[test]
    fn spells_out_leading_digit() {
        assert_eq!(field_identifier("2fa_enabled"), "twofa_enabled");
        assert_eq!(field_identifier("0"), "zero");
        assert_eq!(field_identifier("a1"), "a1");
        assert_eq!(field_identifier(""), "");
    }

    #[test]
    fn builds_model_identifiers() {
        assert_eq!(model_identifier("orders"), "Order");
        assert_eq!(model_identifier("order_items"), "OrderItem");
        assert_eq!(model_identifier("orders_backup"), "OrdersBackup");
        assert_eq!(model_identifier("address"), "Address");
        assert_eq!(model_identifier("shop.users"), "Shop_user");
        assert_eq!(model_identifier("__odd__name"), "OddName");
    }

    #[test]
    fn suffixes_reserved_model_names() {
        assert_eq!(model_identifier("columns"), "ColumnClass");
        assert_eq!(model_identifier("table"), "TableClass");
        assert_eq!(model_identifier("integers"), "IntegerClass");
        assert_eq!(model_identifier("dates"), "DateClass");
    }

    #[test]
    fn model_names_never_shadow_module_imports() {
        assert_eq!(model_identifier("mapped"), "MappedClass");
        assert_eq!(model_identifier("SET"), "SETClass");
        assert_eq!(model_identifier("declarative_base"), "DeclarativeBaseClass");
        assert_eq!(model_identifier("base"), "BaseClass");
        assert_eq!(model_identifier("DOUBLE"), "DOUBLEClass");
        assert_eq!(model_identifier("longblob"), "Longblob");
        assert_eq!(model_identifier("users"), "User");
    }
}
