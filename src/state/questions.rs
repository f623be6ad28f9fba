//! Question pack management.
//!
//! Every haunt plays from the global pack merged with its own custom
//! questions. The merged pack is shuffled per read and capped, so each
//! game session sees a different ordering.

use super::AppState;
use crate::game::shuffle;
use crate::types::*;
use serde::Deserialize;

/// Upper bound on questions handed to a single game session
pub const QUESTION_PACK_CAP: usize = 50;

/// Admin input for a new question; the id is assigned server-side
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub text: String,
    pub answers: [String; 4],
    pub correct_answer: usize,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl QuestionInput {
    pub fn into_question(self) -> TriviaQuestion {
        TriviaQuestion {
            id: ulid::Ulid::new().to_string(),
            text: self.text,
            answers: self.answers,
            correct_answer: self.correct_answer,
            points: self.points.unwrap_or(DEFAULT_QUESTION_POINTS),
            difficulty: self.difficulty,
            category: self.category,
        }
    }
}

impl AppState {
    pub async fn add_global_question(
        &self,
        question: TriviaQuestion,
    ) -> Result<TriviaQuestion, ValidationError> {
        question.validate()?;
        self.global_questions.write().await.push(question.clone());
        tracing::info!("Added global question: {}", question.id);
        Ok(question)
    }

    pub async fn add_custom_question(
        &self,
        haunt_id: &str,
        question: TriviaQuestion,
    ) -> Result<TriviaQuestion, ValidationError> {
        question.validate()?;
        self.custom_questions
            .write()
            .await
            .entry(haunt_id.to_string())
            .or_default()
            .push(question.clone());
        tracing::info!("Added custom question for {}: {}", haunt_id, question.id);
        Ok(question)
    }

    /// Merged global + custom pack for a haunt, shuffled and capped.
    /// None when the haunt is unknown or inactive.
    pub async fn question_pack(&self, haunt_id: &str) -> Option<Vec<TriviaQuestion>> {
        self.get_active_haunt(haunt_id).await?;

        let mut pack = self.global_questions.read().await.clone();
        if let Some(custom) = self.custom_questions.read().await.get(haunt_id) {
            pack.extend(custom.iter().cloned());
        }

        shuffle(&mut pack, &mut rand::rng());
        pack.truncate(QUESTION_PACK_CAP);
        Some(pack)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn test_invalid_question_rejected() {
        let state = AppState::new();
        let mut bad = question("q1");
        bad.correct_answer = 9;

        let result = state.add_global_question(bad).await;
        assert_eq!(result, Err(ValidationError::AnswerIndexOutOfRange(9)));
        assert!(state.global_questions.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_pack_unknown_haunt() {
        let state = AppState::new();
        state.add_global_question(question("g1")).await.unwrap();
        assert!(state.question_pack("nobody-home").await.is_none());
    }

    #[tokio::test]
    async fn test_pack_is_capped() {
        let state = AppState::new();
        state
            .upsert_haunt(haunt("mansion-of-dread", Tier::Premium))
            .await
            .unwrap();

        for i in 0..QUESTION_PACK_CAP + 10 {
            state
                .add_global_question(question(&format!("g{}", i)))
                .await
                .unwrap();
        }

        let pack = state.question_pack("mansion-of-dread").await.unwrap();
        assert_eq!(pack.len(), QUESTION_PACK_CAP);
    }

    #[tokio::test]
    async fn test_custom_questions_stay_per_haunt() {
        let state = AppState::new();
        state
            .upsert_haunt(haunt("haunt-a", Tier::Basic))
            .await
            .unwrap();
        state
            .upsert_haunt(haunt("haunt-b", Tier::Basic))
            .await
            .unwrap();

        state
            .add_custom_question("haunt-a", question("only-a"))
            .await
            .unwrap();

        let pack_b = state.question_pack("haunt-b").await.unwrap();
        assert!(pack_b.iter().all(|q| q.id != "only-a"));
    }

    #[test]
    fn test_question_input_defaults_points() {
        let input: QuestionInput = serde_json::from_str(
            r#"{
                "text": "Who haunts the attic?",
                "answers": ["Ghost", "Bats", "Wind", "Nobody"],
                "correctAnswer": 0
            }"#,
        )
        .unwrap();

        let q = input.into_question();
        assert_eq!(q.points, DEFAULT_QUESTION_POINTS);
        assert!(!q.id.is_empty());
    }
}
