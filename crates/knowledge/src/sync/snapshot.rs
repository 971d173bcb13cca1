//! Last-known-good document snapshot on local disk.

use crate::types::Document;
use assist_core::{AppError, AppResult};
use std::path::Path;

/// Read a JSON array of documents.
pub async fn load_snapshot(path: &Path) -> AppResult<Vec<Document>> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Knowledge(format!("Failed to read snapshot at {:?}: {}", path, e))
    })?;

    let documents: Vec<Document> = serde_json::from_str(&raw).map_err(|e| {
        AppError::Knowledge(format!("Failed to parse snapshot at {:?}: {}", path, e))
    })?;

    tracing::debug!(documents = documents.len(), "Read snapshot from {:?}", path);
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_snapshot() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snapshot.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "1", "title": "Admissions", "content": "Apply early.", "url": "", "lastModified": "2024-01-01T00:00:00Z"},
                {"id": "2", "title": "Library", "content": "Open late."}
            ]"#,
        )
        .unwrap();

        let docs = load_snapshot(&path).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].title, "Library");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_snapshot() {
        let temp = TempDir::new().unwrap();
        assert!(load_snapshot(&temp.path().join("missing.json")).await.is_err());

        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_snapshot(&path).await, Err(AppError::Knowledge(_))));
    }
}
