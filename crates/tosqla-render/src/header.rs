use tosqla_translate::Imports;

use crate::options::RenderOptions;

const GENERATOR: &str = "tosqla";

/// Header comment, import block and declarative base.
pub fn render_header(imports: &Imports, options: &RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();

    match options.generated_at {
        Some(at) => lines.push(format!(
            "# generated by {GENERATOR} on {}",
            at.format("%Y-%m-%d %H:%M:%S")
        )),
        None => lines.push(format!("# generated by {GENERATOR}")),
    }

    if !imports.values.is_empty() {
        lines.extend(imports.values.iter().cloned());
        lines.push(String::new());
    }

    lines.extend(
        imports
            .core
            .iter()
            .map(|symbol| format!("from sqlalchemy import {symbol}")),
    );
    lines.extend(
        imports
            .dialect
            .iter()
            .map(|symbol| format!("from sqlalchemy.dialects.mysql import {symbol}")),
    );

    match &options.base_module {
        Some(module) => {
            lines.push("from sqlalchemy.orm import Mapped".to_string());
            lines.push("from sqlalchemy.orm import mapped_column".to_string());
            lines.push(String::new());
            lines.push(format!("from {module} import Base"));
        }
        None => {
            lines.push("from sqlalchemy.orm import DeclarativeBase".to_string());
            lines.push("from sqlalchemy.orm import Mapped".to_string());
            lines.push("from sqlalchemy.orm import mapped_column".to_string());
            lines.push(String::new());
            lines.push(String::new());
            lines.push("class Base(DeclarativeBase):".to_string());
            lines.push("    pass".to_string());
        }
    }

    lines
}
