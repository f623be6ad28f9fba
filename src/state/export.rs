//! Snapshot export/import of the haunt data set.
//!
//! This covers the durable data (haunt configs, question packs, ads) and
//! doubles as the seed-file format loaded at startup. Runtime-only data
//! (analytics sessions, sidequest progress) is excluded.

use super::AppState;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Schema version for snapshot format compatibility
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateExport {
    pub schema_version: u32,
    pub exported_at: String,
    pub haunts: HashMap<HauntId, HauntConfig>,
    pub global_questions: Vec<TriviaQuestion>,
    pub custom_questions: HashMap<HauntId, Vec<TriviaQuestion>>,
    pub ads: HashMap<HauntId, Vec<AdData>>,
}

impl AppState {
    pub async fn export_state(&self) -> StateExport {
        StateExport {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: chrono::Utc::now().to_rfc3339(),
            haunts: self.haunts.read().await.clone(),
            global_questions: self.global_questions.read().await.clone(),
            custom_questions: self.custom_questions.read().await.clone(),
            ads: self.ads.read().await.clone(),
        }
    }

    /// Replace the durable data with a snapshot. Every document is
    /// validated before anything is swapped in, so a bad snapshot leaves
    /// the current state untouched.
    pub async fn import_state(&self, export: StateExport) -> Result<(), ValidationError> {
        if export.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(ValidationError::UnsupportedSchemaVersion(
                export.schema_version,
            ));
        }

        for config in export.haunts.values() {
            config.validate()?;
        }
        for question in export
            .global_questions
            .iter()
            .chain(export.custom_questions.values().flatten())
        {
            question.validate()?;
        }
        for ad in export.ads.values().flatten() {
            ad.validate()?;
        }

        *self.haunts.write().await = export.haunts;
        *self.global_questions.write().await = export.global_questions;
        *self.custom_questions.write().await = export.custom_questions;
        *self.ads.write().await = export.ads;

        tracing::info!("Imported state snapshot");
        Ok(())
    }

    /// Load a snapshot JSON file (the startup seed path)
    pub async fn load_snapshot_file(&self, path: &std::path::Path) -> Result<(), String> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        let export: StateExport = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
        self.import_state(export).await.map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let state = AppState::new();
        state
            .upsert_haunt(haunt("mansion-of-dread", Tier::Pro))
            .await
            .unwrap();
        state.add_global_question(question("g1")).await.unwrap();
        state
            .add_custom_question("mansion-of-dread", question("c1"))
            .await
            .unwrap();
        state.add_ad("mansion-of-dread", ad("a1")).await.unwrap();

        let export = state.export_state().await;
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);

        let restored = AppState::new();
        restored.import_state(export).await.unwrap();

        assert!(restored.get_haunt("mansion-of-dread").await.is_some());
        assert_eq!(restored.global_questions.read().await.len(), 1);
        assert_eq!(
            restored
                .custom_questions
                .read()
                .await
                .get("mansion-of-dread")
                .map(|v| v.len()),
            Some(1)
        );
        assert_eq!(
            restored.ads.read().await.get("mansion-of-dread").map(|v| v.len()),
            Some(1)
        );
    }

    #[tokio::test]
    async fn test_import_rejects_unknown_schema_version() {
        let state = AppState::new();
        let mut export = state.export_state().await;
        export.schema_version = 99;

        let result = state.import_state(export).await;
        assert_eq!(result, Err(ValidationError::UnsupportedSchemaVersion(99)));
    }

    #[tokio::test]
    async fn test_import_rejects_invalid_documents_without_partial_write() {
        let state = AppState::new();
        state
            .upsert_haunt(haunt("keep-me", Tier::Basic))
            .await
            .unwrap();

        let mut export = AppState::new().export_state().await;
        let mut bad = question("bad");
        bad.correct_answer = 7;
        export.global_questions.push(bad);
        export
            .haunts
            .insert("new-haunt".to_string(), haunt("new-haunt", Tier::Pro));

        let result = state.import_state(export).await;
        assert_eq!(result, Err(ValidationError::AnswerIndexOutOfRange(7)));

        // Existing state untouched
        assert!(state.get_haunt("keep-me").await.is_some());
        assert!(state.get_haunt("new-haunt").await.is_none());
    }

    #[tokio::test]
    async fn test_load_snapshot_file() {
        let source = AppState::new();
        source
            .upsert_haunt(haunt("mansion-of-dread", Tier::Pro))
            .await
            .unwrap();
        source.add_global_question(question("g1")).await.unwrap();
        let export = source.export_state().await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, serde_json::to_string(&export).unwrap()).unwrap();

        let state = AppState::new();
        state.load_snapshot_file(&path).await.unwrap();
        assert!(state.get_haunt("mansion-of-dread").await.is_some());

        // Missing and malformed files surface as errors
        assert!(state
            .load_snapshot_file(&dir.path().join("missing.json"))
            .await
            .is_err());
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();
        assert!(state.load_snapshot_file(&bad).await.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_json_round_trip() {
        let state = AppState::new();
        state
            .upsert_haunt(haunt("mansion-of-dread", Tier::Premium))
            .await
            .unwrap();
        state.add_global_question(question("g1")).await.unwrap();

        let export = state.export_state().await;
        let json = serde_json::to_string_pretty(&export).unwrap();
        let parsed: StateExport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.haunts.len(), 1);
        assert_eq!(parsed.global_questions, export.global_questions);
    }
}
