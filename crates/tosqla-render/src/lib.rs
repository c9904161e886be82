//! Prints translated table records as a SQLAlchemy declarative module.

pub mod body;
pub mod header;
pub mod options;

use tosqla_translate::{GenerationContext, TableRecord};

pub use body::render_table;
pub use header::render_header;
pub use options::RenderOptions;

/// Render a complete Python module for one generation run.
///
/// Imports come from `ctx`, so `records` must be the output of the run that
/// filled it.
pub fn render_module(
    records: &[TableRecord],
    ctx: &GenerationContext,
    options: &RenderOptions,
) -> String {
    let mut lines = render_header(ctx.imports(), options);

    for record in records {
        lines.push(String::new());
        lines.push(String::new());
        lines.extend(render_table(record));
    }

    let mut module = lines.join("\n");
    module.push('\n');
    module
}
