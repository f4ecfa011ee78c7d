use serde::{Deserialize, Serialize};

/// The up-to-four canonical sub-questions derived from a staffing request.
///
/// Built positionally from the planner agent's free-text reply: the reply is
/// split into non-empty lines, a leading `"- "` bullet marker is stripped if
/// present, and the first four resulting lines are assigned in order to
/// availability, effort delta, past involvement, and timezone. When the
/// planner produces fewer than four lines the trailing fields stay `None`;
/// that is a valid plan, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPlan {
    /// Question 1: who are the least busy team members over the assignment window.
    pub availability: Option<String>,
    /// Question 2: the add-N-hours-per-week instruction. Never dispatched to
    /// the backend; consumed by the effort-update stage.
    pub effort_delta: Option<String>,
    /// Question 3: who already worked for the account.
    pub past_involvement: Option<String>,
    /// Question 4: who lives near the account timezone. Absent when the
    /// request did not name a timezone.
    pub timezone: Option<String>,
}

impl QuestionPlan {
    /// Parses a planner reply into a plan.
    ///
    /// Lines map positionally onto the four fields. Anything past the fourth
    /// line is ignored.
    pub fn parse(reply: &str) -> Self {
        let mut lines = reply
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.strip_prefix("- ").unwrap_or(l).trim().to_string());

        Self {
            availability: lines.next(),
            effort_delta: lines.next(),
            past_involvement: lines.next(),
            timezone: lines.next(),
        }
    }

    /// The sub-questions to dispatch to the backend, paired with their keys.
    ///
    /// The effort-delta instruction is excluded: it is an in-process rewrite
    /// instruction, not a backend question. Empty fields are skipped.
    pub fn dispatchable(&self) -> Vec<(AnswerKey, &str)> {
        [
            (AnswerKey::Availability, &self.availability),
            (AnswerKey::PastInvolvement, &self.past_involvement),
            (AnswerKey::TimezoneMatch, &self.timezone),
        ]
        .into_iter()
        .filter_map(|(key, q)| match q.as_deref() {
            Some(text) if !text.is_empty() => Some((key, text)),
            _ => None,
        })
        .collect()
    }
}

/// Key identifying one sub-question within the fan-out batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKey {
    /// The availability / least-busy-members question.
    Availability,
    /// The past-account-involvement question.
    PastInvolvement,
    /// The timezone-compatibility question.
    TimezoneMatch,
}

impl std::fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerKey::Availability => write!(f, "availability"),
            AnswerKey::PastInvolvement => write!(f, "past_involvement"),
            AnswerKey::TimezoneMatch => write!(f, "timezone_match"),
        }
    }
}

/// The successful answers from one fan-out batch.
///
/// Only constructed when every dispatched call succeeded; a batch with any
/// failure aborts the pipeline instead of producing a partial set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerSet {
    /// Answer to the availability question: the schedule text.
    pub availability: Option<String>,
    /// Answer to the past-involvement question.
    pub past_involvement: Option<String>,
    /// Answer to the timezone question, absent when it was never asked.
    pub timezone_match: Option<String>,
}

impl AnswerSet {
    /// Records the answer for the given key.
    pub fn insert(&mut self, key: AnswerKey, answer: String) {
        match key {
            AnswerKey::Availability => self.availability = Some(answer),
            AnswerKey::PastInvolvement => self.past_involvement = Some(answer),
            AnswerKey::TimezoneMatch => self.timezone_match = Some(answer),
        }
    }
}
