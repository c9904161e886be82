use chrono::{TimeZone, Utc};
use tosqla_core::{Column, ColumnType, Index, Table, TableOptions};
use tosqla_render::{RenderOptions, render_module};
use tosqla_translate::{
    DEFAULT_BACKUP_KEY, DEFAULT_BACKUP_POSTFIX, GenerationContext, TranslateOptions, Translator,
    backup_tables,
};

fn users() -> Table {
    Table {
        name: "users".to_string(),
        columns: vec![
            Column::primary_key("id", ColumnType::new("int")),
            Column::new(
                "status",
                ColumnType::new("enum").with_values(["active", "banned"]),
            )
            .not_null(),
            Column::new("created_at", ColumnType::new("timestamp")),
        ],
        indexes: vec![Index::new("ix_status", ["status"], false)],
        options: TableOptions {
            charset: Some("utf8mb4".to_string()),
            collation: None,
            engine: Some("InnoDB".to_string()),
        },
    }
}

fn orders() -> Table {
    Table {
        name: "orders".to_string(),
        columns: vec![
            Column::primary_key("order_id", ColumnType::new("int")),
            Column::new("class", ColumnType::new("varchar").with_length(16)),
            Column::new("note", ColumnType::new("varchar").with_length(32)),
        ],
        indexes: vec![Index::new("ix_class_note", ["class", "note"], true)],
        options: TableOptions::default(),
    }
}

fn fixed_options() -> RenderOptions {
    RenderOptions {
        generated_at: None,
        base_module: None,
    }
}

#[test]
fn renders_models_module() {
    let translator = Translator::new(TranslateOptions {
        abstract_models: false,
        with_tablename: true,
    });
    let mut ctx = GenerationContext::new();
    let records = translator
        .translate_tables(&[users()], &mut ctx)
        .expect("translate");

    let expected = r#"# generated by tosqla
from datetime import datetime

from sqlalchemy import Enum
from sqlalchemy import Integer
from sqlalchemy import TIMESTAMP
from sqlalchemy import text
from sqlalchemy.orm import DeclarativeBase
from sqlalchemy.orm import Mapped
from sqlalchemy.orm import mapped_column


class Base(DeclarativeBase):
    pass


enum_status = Enum("active", "banned")


class User(Base):
    __tablename__ = "users"
    __table_args__ = {"mysql_charset": "utf8mb4", "mysql_engine": "InnoDB"}

    id: Mapped[int] = mapped_column(Integer, primary_key=True)
    status: Mapped[str] = mapped_column(enum_status, index=True)
    created_at: Mapped[datetime | None] = mapped_column(TIMESTAMP, server_default=text("CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"))
"#;

    assert_eq!(render_module(&records, &ctx, &fixed_options()), expected);
}

#[test]
fn model_classes_do_not_rebind_header_names() {
    let mapped = Table {
        name: "mapped".to_string(),
        ..users()
    };
    let mut ctx = GenerationContext::new();
    let records = Translator::default()
        .translate_tables(&[mapped, users()], &mut ctx)
        .expect("translate");

    let module = render_module(&records, &ctx, &fixed_options());

    assert!(module.contains("from sqlalchemy.orm import Mapped\n"));
    assert!(module.contains("class MappedClass(Base):\n"));
    assert!(!module.contains("class Mapped(Base):"));
    assert!(module.contains("class User(Base):\n"));
    assert_eq!(module.matches("id: Mapped[int] = mapped_column(").count(), 2);
}

#[test]
fn renders_abstract_backup_models() {
    let backups = backup_tables(&[orders()], DEFAULT_BACKUP_POSTFIX, DEFAULT_BACKUP_KEY);
    let translator = Translator::new(TranslateOptions {
        abstract_models: true,
        with_tablename: false,
    });
    let mut ctx = GenerationContext::new();
    let records = translator
        .translate_tables(&backups, &mut ctx)
        .expect("translate backups");

    let module = render_module(&records, &ctx, &fixed_options());

    assert!(module.contains("from sqlalchemy import Index\n"));
    assert!(module.contains("from sqlalchemy import String\n"));
    assert!(module.contains(concat!(
        "class OrdersBackup(Base):\n",
        "    __abstract__ = True\n",
        "    __table_args__ = (\n",
        "        Index(\"ix_class_note\", \"class\", \"note\", unique=True),\n",
        "    )\n",
    )));
    assert!(module.contains("    id: Mapped[int] = mapped_column(Integer, primary_key=True)\n"));
    assert!(module.contains("    order_id: Mapped[int] = mapped_column(Integer, index=True)\n"));
    assert!(module.contains(
        "    class_: Mapped[str | None] = mapped_column(\"class\", String(16))\n"
    ));
    assert!(!module.contains("__tablename__"));
}

#[test]
fn header_carries_timestamp_and_external_base() {
    let mut ctx = GenerationContext::new();
    let records = Translator::default()
        .translate_tables(&[], &mut ctx)
        .expect("empty run");

    let options = RenderOptions {
        generated_at: Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).single(),
        base_module: Some("app.models.base".to_string()),
    };
    let module = render_module(&records, &ctx, &options);

    assert!(module.starts_with("# generated by tosqla on 2025-06-30 12:00:00\n"));
    assert!(module.ends_with("from app.models.base import Base\n"));
    assert!(!module.contains("DeclarativeBase"));
}
