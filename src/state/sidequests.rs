use super::AppState;
use crate::sidequest;
use crate::types::*;
use serde::Deserialize;

/// Client input when recording mini-game progress
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidequestProgressInput {
    pub sidequest_id: SidequestId,
    pub session_id: SessionId,
    pub completed: bool,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl AppState {
    /// Sidequests unlocked by the haunt's tier. None when the haunt is
    /// unknown or inactive.
    pub async fn available_sidequests(&self, haunt_id: &str) -> Option<Vec<String>> {
        let config = self.get_active_haunt(haunt_id).await?;
        Some(
            sidequest::available_for(config.tier)
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    /// Record mini-game progress, rejecting sidequests the haunt's tier
    /// hasn't unlocked
    pub async fn record_sidequest_progress(
        &self,
        haunt_id: &str,
        input: SidequestProgressInput,
    ) -> Result<SidequestProgress, String> {
        let config = self
            .get_active_haunt(haunt_id)
            .await
            .ok_or_else(|| "Haunt not found".to_string())?;

        if !sidequest::is_unlocked(config.tier, &input.sidequest_id) {
            return Err(format!(
                "Sidequest '{}' is not unlocked for tier {:?}",
                input.sidequest_id, config.tier
            ));
        }

        let progress = SidequestProgress {
            haunt_id: haunt_id.to_string(),
            sidequest_id: input.sidequest_id,
            session_id: input.session_id,
            completed: input.completed,
            data: input.data,
            recorded_at: chrono::Utc::now().to_rfc3339(),
        };

        self.sidequest_progress.write().await.push(progress.clone());

        tracing::info!(
            "Recorded sidequest progress: haunt={}, sidequest={}, completed={}",
            progress.haunt_id,
            progress.sidequest_id,
            progress.completed
        );
        Ok(progress)
    }

    pub async fn sidequest_progress_for(&self, haunt_id: &str) -> Vec<SidequestProgress> {
        self.sidequest_progress
            .read()
            .await
            .iter()
            .filter(|p| p.haunt_id == haunt_id)
            .cloned()
            .collect()
    }
}
