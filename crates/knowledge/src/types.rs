//! Knowledge system type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document in the corpus.
///
/// Documents are immutable once ingested: a sync replaces the whole corpus
/// rather than editing documents in place. The serialized form (camelCase,
/// RFC 3339 timestamps) is also the fallback snapshot file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Identifier, stable across syncs
    pub id: String,

    pub title: String,

    pub content: String,

    /// Canonical URL of the source page
    #[serde(default)]
    pub url: String,

    #[serde(default = "Utc::now")]
    pub last_modified: DateTime<Utc>,
}

impl Document {
    /// The text that gets indexed for this document.
    pub fn indexable_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_format() {
        let json = r#"{
            "id": "adm-1",
            "title": "Admissions",
            "content": "Apply before March 1st.",
            "url": "https://example.edu/admissions",
            "lastModified": "2024-01-15T10:30:00.000Z"
        }"#;

        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id, "adm-1");
        assert_eq!(doc.last_modified.to_rfc3339(), "2024-01-15T10:30:00+00:00");
        assert_eq!(doc.indexable_text(), "Admissions Apply before March 1st.");

        let back = serde_json::to_value(&doc).unwrap();
        assert!(back.get("lastModified").is_some());
    }

    #[test]
    fn test_optional_fields_default() {
        let doc: Document =
            serde_json::from_str(r#"{"id": "1", "title": "Library", "content": "Open 9-5."}"#)
                .unwrap();
        assert_eq!(doc.url, "");
    }
}
