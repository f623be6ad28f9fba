use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque ID types for type safety
pub type HauntId = String;
pub type QuestionId = String;
pub type AdId = String;
pub type SidequestId = String;
pub type SessionId = String;

/// Questions between ad interstitials
pub const QUESTIONS_PER_ROUND: u32 = 5;

/// Point value used when a question doesn't carry its own
pub const DEFAULT_QUESTION_POINTS: u32 = 100;

/// Storage key for the persisted leaderboard
pub const LEADERBOARD_KEY: &str = "heinous-trivia-leaderboard";

/// Leaderboard is capped to the top N entries by score
pub const LEADERBOARD_CAP: usize = 10;

/// Validation failure at a persistence boundary (imports, admin writes)
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("correct answer index {0} is out of range (expected 0..4)")]
    AnswerIndexOutOfRange(usize),
    #[error("invalid haunt id '{0}' (alphanumeric/dash/underscore, length 2-50)")]
    InvalidHauntId(String),
    #[error("unsupported snapshot schema version {0}")]
    UnsupportedSchemaVersion(u32),
}

/// Subscription tier controlling themes, sidequests, and customization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Pro,
    Premium,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Individual,
    Queue,
}

/// Per-tenant configuration. Owned by the admin surface; read-only
/// from the game's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HauntConfig {
    pub id: HauntId,
    pub name: String,
    pub tier: Tier,
    pub theme_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub progress_bar_theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<String>,
    pub auth_code: String,
    pub is_active: bool,
    pub mode: GameMode,
}

impl HauntConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !crate::haunt::is_valid_haunt_id(&self.id) {
            return Err(ValidationError::InvalidHauntId(self.id.clone()));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if self.auth_code.trim().is_empty() {
            return Err(ValidationError::EmptyField("authCode"));
        }
        Ok(())
    }
}

/// A trivia question with exactly 4 answer choices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriviaQuestion {
    pub id: QuestionId,
    pub text: String,
    pub answers: [String; 4],
    pub correct_answer: usize,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

fn default_points() -> u32 {
    DEFAULT_QUESTION_POINTS
}

impl TriviaQuestion {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyField("text"));
        }
        if self.answers.iter().any(|a| a.trim().is_empty()) {
            return Err(ValidationError::EmptyField("answers"));
        }
        if self.correct_answer >= self.answers.len() {
            return Err(ValidationError::AnswerIndexOutOfRange(self.correct_answer));
        }
        Ok(())
    }
}

/// An ad shown during interstitials between question rounds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdData {
    pub id: AdId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub duration_seconds: u32,
}

impl AdData {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        if self.image_url.trim().is_empty() {
            return Err(ValidationError::EmptyField("imageUrl"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub date: String,
    pub haunt_id: HauntId,
    pub questions_answered: u32,
    pub correct_answers: u32,
}

/// In-memory game session state. Single owner, advanced only through
/// the pure transitions in `game`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub haunt_id: HauntId,
    pub haunt_config: Option<HauntConfig>,
    pub score: u32,
    pub current_question_index: usize,
    pub questions: Vec<TriviaQuestion>,
    pub ads: Vec<AdData>,
    pub selected_answer: Option<usize>,
    pub show_feedback: bool,
    pub is_correct: bool,
    pub game_complete: bool,
    pub show_end_screen: bool,
    pub show_ad: bool,
    pub show_leaderboard: bool,
    pub correct_answers: u32,
    pub questions_answered: u32,
    pub current_ad_index: usize,
}

/// Recorded mini-game progress for a haunt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SidequestProgress {
    pub haunt_id: HauntId,
    pub sidequest_id: SidequestId,
    pub session_id: SessionId,
    pub completed: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    pub recorded_at: String,
}

/// Explicit analytics session context, passed through call sites
/// instead of living in a process-wide static.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSession {
    pub id: SessionId,
    pub haunt_id: HauntId,
    pub started_at: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    GameStart,
    GameComplete,
    AdView,
    SidequestOffered,
    SidequestCompleted,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub session_id: SessionId,
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions_answered: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<u32>,
    pub ts: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> TriviaQuestion {
        TriviaQuestion {
            id: "q1".to_string(),
            text: "What lurks in the cellar?".to_string(),
            answers: [
                "A ghoul".to_string(),
                "A draft".to_string(),
                "Raccoons".to_string(),
                "Nothing".to_string(),
            ],
            correct_answer: 0,
            points: 100,
            difficulty: None,
            category: None,
        }
    }

    #[test]
    fn test_question_validation() {
        assert!(question().validate().is_ok());

        let mut q = question();
        q.correct_answer = 4;
        assert_eq!(q.validate(), Err(ValidationError::AnswerIndexOutOfRange(4)));

        let mut q = question();
        q.text = "  ".to_string();
        assert_eq!(q.validate(), Err(ValidationError::EmptyField("text")));

        let mut q = question();
        q.answers[2] = String::new();
        assert_eq!(q.validate(), Err(ValidationError::EmptyField("answers")));
    }

    #[test]
    fn test_question_points_default_on_deserialize() {
        let json = r#"{
            "id": "q9",
            "text": "Pick one",
            "answers": ["a", "b", "c", "d"],
            "correctAnswer": 2
        }"#;
        let q: TriviaQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.points, DEFAULT_QUESTION_POINTS);
    }

    #[test]
    fn test_haunt_config_validation() {
        let config = HauntConfig {
            id: "mansion-of-dread".to_string(),
            name: "Mansion of Dread".to_string(),
            tier: Tier::Pro,
            theme_color: "#8B0000".to_string(),
            secondary_color: "#2F4F4F".to_string(),
            accent_color: "#FF6347".to_string(),
            progress_bar_theme: "blood".to_string(),
            logo_path: None,
            auth_code: "secret123".to_string(),
            is_active: true,
            mode: GameMode::Individual,
        };
        assert!(config.validate().is_ok());

        let mut bad = config.clone();
        bad.id = "x".to_string();
        assert!(matches!(
            bad.validate(),
            Err(ValidationError::InvalidHauntId(_))
        ));

        let mut bad = config;
        bad.auth_code = String::new();
        assert_eq!(bad.validate(), Err(ValidationError::EmptyField("authCode")));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Basic < Tier::Pro);
        assert!(Tier::Pro < Tier::Premium);
    }

    #[test]
    fn test_tier_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Premium).unwrap(), "\"premium\"");
        let t: Tier = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(t, Tier::Basic);
    }
}
