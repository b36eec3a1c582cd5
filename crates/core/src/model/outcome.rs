use serde::Serialize;

use crate::model::summary::QuizSummary;

/// Result of resolving one question, by click or by timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub question_index: usize,
    /// `None` when the countdown ran out.
    pub chosen_index: Option<usize>,
    pub was_correct: bool,
}

impl AnswerOutcome {
    #[must_use]
    pub fn answered(question_index: usize, chosen_index: usize, was_correct: bool) -> Self {
        Self {
            question_index,
            chosen_index: Some(chosen_index),
            was_correct,
        }
    }

    #[must_use]
    pub fn timed_out(question_index: usize) -> Self {
        Self {
            question_index,
            chosen_index: None,
            was_correct: false,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.chosen_index.is_none()
    }

    /// The effect a presentation layer should play for this outcome.
    #[must_use]
    pub fn effect_kind(&self) -> EffectKind {
        match (self.chosen_index, self.was_correct) {
            (None, _) => EffectKind::Timeout,
            (Some(_), true) => EffectKind::Correct,
            (Some(_), false) => EffectKind::Incorrect,
        }
    }
}

/// Screen-space anchor for an effect, in whatever units the renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectKind {
    Correct,
    Incorrect,
    Timeout,
    SessionEnd(QuizSummary),
}

impl EffectKind {
    /// Failure feedback (a renderer typically flashes and shakes).
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, EffectKind::Incorrect | EffectKind::Timeout)
    }
}

/// Presentation event emitted by the session engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectEvent {
    #[serde(flatten)]
    pub kind: EffectKind,
    pub question_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl EffectEvent {
    #[must_use]
    pub fn for_outcome(outcome: &AnswerOutcome, position: Option<Position>) -> Self {
        Self {
            kind: outcome.effect_kind(),
            question_index: outcome.question_index,
            position,
        }
    }

    #[must_use]
    pub fn session_end(summary: QuizSummary) -> Self {
        Self {
            kind: EffectKind::SessionEnd(summary),
            question_index: summary.total,
            position: None,
        }
    }
}
