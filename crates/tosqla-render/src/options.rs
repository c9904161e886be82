use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Options for rendering a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Timestamp written into the header comment; omitted when unset.
    pub generated_at: Option<DateTime<Utc>>,
    /// Module to import `Base` from instead of declaring it in the output.
    pub base_module: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            generated_at: Some(Utc::now()),
            base_module: None,
        }
    }
}
