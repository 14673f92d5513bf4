//! Experiment card: the display block for one record.

use colored::Colorize;
use serde::Serialize;

use crate::record::Record;

/// Placeholder for absent organism, category and impact values.
pub const NOT_AVAILABLE: &str = "N/A";
/// Text of the outbound publication link.
pub const LINK_LABEL: &str = "🔗 Read Full Publication";

/// Render-ready card fields, fallbacks already applied.
///
/// Also the card shape of the web API, so the browser never re-implements
/// the placeholder rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub organism: String,
    pub category: String,
    pub impact: String,
    /// Link target; empty when the record has none. Never validated.
    pub url: String,
}

impl Card {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone().unwrap_or_default(),
            organism: or_placeholder(&record.organism),
            category: or_placeholder(&record.category),
            impact: or_placeholder(&record.impact),
            url: record.url.clone().unwrap_or_default(),
        }
    }

    /// Terminal rendering: a bordered block with labelled fields.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("┌ {}\n", self.title.bold()));
        out.push_str(&format!("│ {} {}\n", "Organism:".bold(), self.organism));
        out.push_str(&format!("│ {} {}\n", "Category:".bold(), self.category));
        out.push_str(&format!("│ {} {}\n", "Impact:".bold(), self.impact));
        out.push_str(&format!("└ {} {}\n", LINK_LABEL, self.url.blue().underline()));
        out
    }
}

fn or_placeholder(field: &Option<String>) -> String {
    match field.as_deref() {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
