use super::AppState;
use crate::auth::constant_time_eq;
use crate::types::*;

impl AppState {
    /// Create or replace a haunt config after validating it
    pub async fn upsert_haunt(&self, config: HauntConfig) -> Result<HauntConfig, ValidationError> {
        config.validate()?;

        self.haunts
            .write()
            .await
            .insert(config.id.clone(), config.clone());

        tracing::info!("Upserted haunt config: {}", config.id);
        Ok(config)
    }

    pub async fn get_haunt(&self, id: &str) -> Option<HauntConfig> {
        self.haunts.read().await.get(id).cloned()
    }

    /// Haunt config as players see it: inactive haunts don't exist
    pub async fn get_active_haunt(&self, id: &str) -> Option<HauntConfig> {
        self.haunts
            .read()
            .await
            .get(id)
            .filter(|h| h.is_active)
            .cloned()
    }

    pub async fn list_haunts(&self) -> Vec<HauntConfig> {
        let mut haunts: Vec<_> = self.haunts.read().await.values().cloned().collect();
        haunts.sort_by(|a, b| a.id.cmp(&b.id));
        haunts
    }

    /// Check an admin auth code for a haunt: the haunt's own code or the
    /// master code. Unknown haunts always fail.
    pub async fn verify_auth_code(&self, haunt_id: &str, code: &str) -> bool {
        let Some(config) = self.get_haunt(haunt_id).await else {
            return false;
        };

        constant_time_eq(config.auth_code.as_bytes(), code.as_bytes())
            || self.admin.is_master(code)
    }
}
