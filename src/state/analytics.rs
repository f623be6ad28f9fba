//! Analytics session and event tracking.
//!
//! Sessions are explicit context objects handed back to the client and
//! threaded through every event, rather than a process-wide current
//! session id.

use super::AppState;
use crate::types::*;
use serde::Serialize;

/// Per-haunt aggregates for the analytics dashboard
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub haunt_id: HauntId,
    pub sessions: usize,
    pub games_started: usize,
    pub games_completed: usize,
    pub total_questions_answered: u32,
    pub total_correct_answers: u32,
}

impl AppState {
    /// Open a session for a haunt. The returned context must accompany
    /// every event the client reports.
    pub async fn open_session(&self, haunt_id: &str) -> Result<AnalyticsSession, String> {
        self.get_active_haunt(haunt_id)
            .await
            .ok_or_else(|| "Haunt not found".to_string())?;

        let session = AnalyticsSession {
            id: ulid::Ulid::new().to_string(),
            haunt_id: haunt_id.to_string(),
            started_at: chrono::Utc::now().to_rfc3339(),
        };

        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());

        tracing::info!("Opened analytics session {} for {}", session.id, haunt_id);
        Ok(session)
    }

    /// Record an event against an open session
    pub async fn record_event(
        &self,
        session_id: &str,
        kind: EventKind,
        score: Option<u32>,
        questions_answered: Option<u32>,
        correct_answers: Option<u32>,
    ) -> Result<AnalyticsEvent, String> {
        if !self.sessions.read().await.contains_key(session_id) {
            return Err("Unknown analytics session".to_string());
        }

        let event = AnalyticsEvent {
            session_id: session_id.to_string(),
            kind,
            score,
            questions_answered,
            correct_answers,
            ts: chrono::Utc::now().to_rfc3339(),
        };

        self.events.write().await.push(event.clone());
        Ok(event)
    }

    /// Aggregate a haunt's sessions and events
    pub async fn analytics_summary(&self, haunt_id: &str) -> AnalyticsSummary {
        let sessions = self.sessions.read().await;
        let haunt_sessions: std::collections::HashSet<&str> = sessions
            .values()
            .filter(|s| s.haunt_id == haunt_id)
            .map(|s| s.id.as_str())
            .collect();

        let events = self.events.read().await;
        let mut games_started = 0;
        let mut games_completed = 0;
        let mut total_questions_answered = 0;
        let mut total_correct_answers = 0;

        for event in events
            .iter()
            .filter(|e| haunt_sessions.contains(e.session_id.as_str()))
        {
            match event.kind {
                EventKind::GameStart => games_started += 1,
                EventKind::GameComplete => {
                    games_completed += 1;
                    total_questions_answered += event.questions_answered.unwrap_or(0);
                    total_correct_answers += event.correct_answers.unwrap_or(0);
                }
                _ => {}
            }
        }

        AnalyticsSummary {
            haunt_id: haunt_id.to_string(),
            sessions: haunt_sessions.len(),
            games_started,
            games_completed,
            total_questions_answered,
            total_correct_answers,
        }
    }
}
