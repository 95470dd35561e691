use chrono::{DateTime, Utc};
use serde::Serialize;

use musechat_models::Message;

/// Downloadable snapshot of one conversation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub exported_at: DateTime<Utc>,
}

/// Lowercase the title and map every character outside [a-z0-9] to '-'
pub(crate) fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
