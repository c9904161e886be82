use tosqla_core::{Column, ColumnType, DatabaseSchema, Table, TableOptions};

fn orders_snapshot() -> DatabaseSchema {
    DatabaseSchema {
        schema_version: "0.1".to_string(),
        engine: "mysql".to_string(),
        database: Some("shop".to_string()),
        tables: vec![Table {
            name: "orders".to_string(),
            columns: vec![Column::primary_key("id", ColumnType::new("int"))],
            indexes: Vec::new(),
            options: TableOptions::default(),
        }],
    }
}

#[test]
fn serializes_schema_deterministically() {
    let json = serde_json::to_string_pretty(&orders_snapshot()).expect("serialize schema");
    let expected = r#"{
  "schema_version": "0.1",
  "engine": "mysql",
  "database": "shop",
  "tables": [
    {
      "name": "orders",
      "columns": [
        {
          "name": "id",
          "column_type": {
            "data_type": "int"
          },
          "is_nullable": false,
          "is_primary_key": true,
          "is_indexed": false,
          "is_unique": false
        }
      ],
      "indexes": [],
      "options": {}
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn deserializes_type_parameters() {
    let json = r#"{
        "data_type": "enum",
        "charset": "latin1",
        "values": ["b", "a"]
    }"#;
    let column_type: ColumnType = serde_json::from_str(json).expect("parse column type");
    assert_eq!(
        column_type,
        ColumnType::new("enum")
            .with_charset("latin1")
            .with_values(["b", "a"])
    );
}
