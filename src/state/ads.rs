use super::AppState;
use crate::game::shuffle;
use crate::types::*;
use serde::Deserialize;

/// Admin input for a new ad; the id is assigned server-side
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdInput {
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default = "default_duration")]
    pub duration_seconds: u32,
}

fn default_duration() -> u32 {
    10
}

impl AdInput {
    pub fn into_ad(self) -> AdData {
        AdData {
            id: ulid::Ulid::new().to_string(),
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            link: self.link,
            duration_seconds: self.duration_seconds,
        }
    }
}

impl AppState {
    pub async fn add_ad(&self, haunt_id: &str, ad: AdData) -> Result<AdData, ValidationError> {
        ad.validate()?;
        self.ads
            .write()
            .await
            .entry(haunt_id.to_string())
            .or_default()
            .push(ad.clone());
        tracing::info!("Added ad for {}: {}", haunt_id, ad.id);
        Ok(ad)
    }

    /// A haunt's ads, shuffled for interstitial rotation. None when the
    /// haunt is unknown or inactive.
    pub async fn ads_for(&self, haunt_id: &str) -> Option<Vec<AdData>> {
        self.get_active_haunt(haunt_id).await?;

        let mut ads = self
            .ads
            .read()
            .await
            .get(haunt_id)
            .cloned()
            .unwrap_or_default();
        shuffle(&mut ads, &mut rand::rng());
        Some(ads)
    }
}
