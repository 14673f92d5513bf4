//! Publication record model.
//!
//! A [`Record`] (called an "experiment" in the UI) is one entry of the JSON
//! array returned by `GET /api/experiments`. Records are read-only snapshots:
//! nothing in the explorer creates or mutates them after decoding.
//!
//! Decoding is lenient. The backend payload uses capitalized
//! keys (`Title`, `Organism`, `Category`, `Impact`, `URL`) plus a Mongo-style
//! `_id`. Any field may be missing, `null`, or of an unexpected type; such
//! fields decode to `None` and fall back to placeholder text at render time.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One publication entry returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct Record {
    /// Display key. Strings and numbers are both accepted; absent ids decode
    /// to an empty string.
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Organism", skip_serializing_if = "Option::is_none")]
    pub organism: Option<String>,
    #[serde(rename = "Category", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "Impact", skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Record {
    /// The record's category, treating an empty string as absent.
    pub fn category_label(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// Decode a JSON body into records.
///
/// Fails only when the body is not JSON or not an array; individual record
/// shapes are never rejected.
pub fn parse_records(body: &str) -> serde_json::Result<Vec<Record>> {
    serde_json::from_str(body)
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

/// Wire shape of a record. `_id` and `id` are separate keys so a payload
/// carrying both (Mongo documents with virtuals) still decodes; `_id` wins.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient_text")]
    mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(rename = "Title", default, deserialize_with = "lenient_text")]
    title: Option<String>,
    #[serde(rename = "Organism", default, deserialize_with = "lenient_text")]
    organism: Option<String>,
    #[serde(rename = "Category", default, deserialize_with = "lenient_text")]
    category: Option<String>,
    #[serde(rename = "Impact", default, deserialize_with = "lenient_text")]
    impact: Option<String>,
    #[serde(rename = "URL", default, deserialize_with = "lenient_text")]
    url: Option<String>,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Self {
            id: raw.mongo_id.or(raw.id).unwrap_or_default(),
            title: raw.title,
            organism: raw.organism,
            category: raw.category,
            impact: raw.impact,
            url: raw.url,
        }
    }
}

/// Map any JSON scalar to its display text. Objects, arrays and `null`
/// become `None`.
fn scalar_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(scalar_text(value))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
