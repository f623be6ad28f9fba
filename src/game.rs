//! Trivia game state machine.
//!
//! Pure, synchronous transitions over [`GameState`]: each operation takes
//! the current state and returns the next one. The only persistence is the
//! leaderboard, which goes through the injected [`KeyValueStore`].

use crate::storage::KeyValueStore;
use crate::types::*;
use rand::Rng;

impl GameState {
    /// Fresh per-session state. Questions and ads are expected to be
    /// shuffled by the loader before they arrive here.
    pub fn initial(
        haunt_id: HauntId,
        haunt_config: Option<HauntConfig>,
        questions: Vec<TriviaQuestion>,
        ads: Vec<AdData>,
    ) -> Self {
        Self {
            haunt_id,
            haunt_config,
            score: 0,
            current_question_index: 0,
            questions,
            ads,
            selected_answer: None,
            show_feedback: false,
            is_correct: false,
            game_complete: false,
            show_end_screen: false,
            show_ad: false,
            show_leaderboard: false,
            correct_answers: 0,
            questions_answered: 0,
            current_ad_index: 0,
        }
    }

    pub fn current_question(&self) -> Option<&TriviaQuestion> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_ad(&self) -> Option<&AdData> {
        self.ads.get(self.current_ad_index)
    }

    /// Record an answer selection and enter feedback.
    ///
    /// No-op while feedback is already showing, so a double tap can't
    /// submit twice.
    pub fn select_answer(&self, answer_index: usize) -> GameState {
        if self.selected_answer.is_some() {
            return self.clone();
        }
        let Some(question) = self.current_question() else {
            return self.clone();
        };

        let is_correct = answer_index == question.correct_answer;
        let mut next = self.clone();
        next.selected_answer = Some(answer_index);
        next.show_feedback = true;
        next.is_correct = is_correct;
        next.questions_answered += 1;
        if is_correct {
            next.score += question.points;
            next.correct_answers += 1;
        }
        next
    }

    /// Leave feedback and move on: ad interstitial at a round boundary
    /// when questions remain, end screen when the list is exhausted,
    /// otherwise the next question.
    pub fn next_question(&self) -> GameState {
        let mut next = self.clone();
        next.selected_answer = None;
        next.show_feedback = false;
        next.is_correct = false;

        let next_index = self.current_question_index + 1;
        let at_round_boundary = self.questions_answered > 0
            && self.questions_answered % QUESTIONS_PER_ROUND == 0;

        if at_round_boundary && next_index < self.questions.len() {
            // Index advance is deferred until close_ad
            next.show_ad = true;
            return next;
        }

        if next_index >= self.questions.len() {
            next.game_complete = true;
            next.show_end_screen = true;
            return next;
        }

        next.current_question_index = next_index;
        next
    }

    /// Dismiss the interstitial, applying the question advance that was
    /// deferred at the round boundary and cycling to the next ad.
    pub fn close_ad(&self) -> GameState {
        let mut next = self.clone();
        next.show_ad = false;
        next.current_question_index = self.current_question_index + 1;
        next.current_ad_index = if self.ads.is_empty() {
            0
        } else {
            (self.current_ad_index + 1) % self.ads.len()
        };
        next
    }

    pub fn open_leaderboard(&self) -> GameState {
        let mut next = self.clone();
        next.show_leaderboard = true;
        next
    }

    pub fn close_leaderboard(&self) -> GameState {
        let mut next = self.clone();
        next.show_leaderboard = false;
        next
    }

    /// Zero all progress while keeping the already-loaded config,
    /// question list, and ad list.
    pub fn reset(&self) -> GameState {
        GameState::initial(
            self.haunt_id.clone(),
            self.haunt_config.clone(),
            self.questions.clone(),
            self.ads.clone(),
        )
    }
}

/// Read the leaderboard from the store. Missing or corrupt data is
/// treated as an empty list rather than an error.
pub fn get_leaderboard(store: &dyn KeyValueStore) -> Vec<LeaderboardEntry> {
    store
        .get(LEADERBOARD_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Append a final score, keeping the list sorted descending by score and
/// capped to the top 10. Returns the entry that was written.
pub fn save_score(
    store: &dyn KeyValueStore,
    player_name: &str,
    state: &GameState,
) -> LeaderboardEntry {
    let entry = LeaderboardEntry {
        name: player_name.to_string(),
        score: state.score,
        date: chrono::Utc::now().to_rfc3339(),
        haunt_id: state.haunt_id.clone(),
        questions_answered: state.questions_answered,
        correct_answers: state.correct_answers,
    };

    let mut board = get_leaderboard(store);
    board.push(entry.clone());
    board.sort_by(|a, b| b.score.cmp(&a.score));
    board.truncate(LEADERBOARD_CAP);

    match serde_json::to_string(&board) {
        Ok(json) => store.set(LEADERBOARD_KEY, json),
        Err(e) => tracing::warn!("Failed to serialize leaderboard: {}", e),
    }

    entry
}

/// In-place Fisher-Yates shuffle, walking from the end and swapping with
/// a uniformly random earlier-or-equal index.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
