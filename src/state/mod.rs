mod ads;
mod analytics;
mod haunts;
mod questions;
mod sidequests;

pub mod export;

pub use ads::AdInput;
pub use analytics::AnalyticsSummary;
pub use questions::{QuestionInput, QUESTION_PACK_CAP};
pub use sidequests::SidequestProgressInput;

use crate::auth::AdminConfig;
use crate::types::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state: the in-process system of record for haunt
/// configuration, question packs, ads, sidequest progress, and analytics.
#[derive(Clone)]
pub struct AppState {
    pub haunts: Arc<RwLock<HashMap<HauntId, HauntConfig>>>,
    /// Question pack shared by every haunt
    pub global_questions: Arc<RwLock<Vec<TriviaQuestion>>>,
    /// Haunt-specific custom questions, merged into the pack at read time
    pub custom_questions: Arc<RwLock<HashMap<HauntId, Vec<TriviaQuestion>>>>,
    pub ads: Arc<RwLock<HashMap<HauntId, Vec<AdData>>>>,
    pub sidequest_progress: Arc<RwLock<Vec<SidequestProgress>>>,
    pub sessions: Arc<RwLock<HashMap<SessionId, AnalyticsSession>>>,
    pub events: Arc<RwLock<Vec<AnalyticsEvent>>>,
    pub admin: AdminConfig,
}

impl AppState {
    pub fn new() -> Self {
        Self::new_with_admin(AdminConfig::default())
    }

    pub fn new_with_admin(admin: AdminConfig) -> Self {
        Self {
            haunts: Arc::new(RwLock::new(HashMap::new())),
            global_questions: Arc::new(RwLock::new(Vec::new())),
            custom_questions: Arc::new(RwLock::new(HashMap::new())),
            ads: Arc::new(RwLock::new(HashMap::new())),
            sidequest_progress: Arc::new(RwLock::new(Vec::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            events: Arc::new(RwLock::new(Vec::new())),
            admin,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn test_upsert_and_get_haunt() {
        let state = AppState::new();
        let config = haunt("mansion-of-dread", Tier::Pro);

        state.upsert_haunt(config.clone()).await.unwrap();
        let fetched = state.get_haunt("mansion-of-dread").await.unwrap();
        assert_eq!(fetched, config);
    }

    #[tokio::test]
    async fn test_inactive_haunt_hidden_from_players() {
        let state = AppState::new();
        let mut config = haunt("closed-for-season", Tier::Basic);
        config.is_active = false;

        state.upsert_haunt(config).await.unwrap();
        assert!(state.get_haunt("closed-for-season").await.is_some());
        assert!(state.get_active_haunt("closed-for-season").await.is_none());
    }

    #[tokio::test]
    async fn test_auth_code_verification() {
        let state = AppState::new_with_admin(AdminConfig {
            master_code: Some("master".to_string()),
        });
        state
            .upsert_haunt(haunt("mansion-of-dread", Tier::Pro))
            .await
            .unwrap();

        assert!(
            state
                .verify_auth_code("mansion-of-dread", "code-mansion-of-dread")
                .await
        );
        assert!(state.verify_auth_code("mansion-of-dread", "master").await);
        assert!(!state.verify_auth_code("mansion-of-dread", "wrong").await);
        assert!(!state.verify_auth_code("unknown-haunt", "master").await);
    }

    #[tokio::test]
    async fn test_question_pack_merges_global_and_custom() {
        let state = AppState::new();
        state
            .upsert_haunt(haunt("mansion-of-dread", Tier::Pro))
            .await
            .unwrap();

        state.add_global_question(question("g1")).await.unwrap();
        state.add_global_question(question("g2")).await.unwrap();
        state
            .add_custom_question("mansion-of-dread", question("c1"))
            .await
            .unwrap();

        let pack = state.question_pack("mansion-of-dread").await.unwrap();
        assert_eq!(pack.len(), 3);
        let ids: Vec<_> = pack.iter().map(|q| q.id.as_str()).collect();
        assert!(ids.contains(&"g1"));
        assert!(ids.contains(&"c1"));
    }
}
