use chrono::{DateTime, Utc};

use quiz_core::model::{QuestionSpec, SessionGeneration};

/// Lifecycle of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Before `start` and after `restart`.
    Idle,
    /// A question is on screen and its countdown is running.
    Active,
    /// Every question has been resolved.
    Finished,
}

/// Handle for the advance scheduled after an answer or timeout.
///
/// A ticket is only honoured while it is the session's pending advance; once
/// it fires, or the session restarts, it is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    pub generation: SessionGeneration,
    pub question_index: usize,
    pub due: DateTime<Utc>,
}

impl AdvanceTicket {
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.due
    }
}

/// Everything that changes while a session runs.
///
/// Only `QuizSession` writes to it; a restart swaps in a fresh instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub(super) phase: SessionPhase,
    pub(super) questions: Vec<QuestionSpec>,
    pub(super) current_index: usize,
    pub(super) score: usize,
    pub(super) input_locked: bool,
    pub(super) deadline: Option<DateTime<Utc>>,
    pub(super) pending: Option<AdvanceTicket>,
    pub(super) generation: SessionGeneration,
}

impl SessionState {
    pub(super) fn new(questions: Vec<QuestionSpec>, generation: SessionGeneration) -> Self {
        Self {
            phase: SessionPhase::Idle,
            questions,
            current_index: 0,
            score: 0,
            input_locked: false,
            deadline: None,
            pending: None,
            generation,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    #[must_use]
    pub fn pending(&self) -> Option<AdvanceTicket> {
        self.pending
    }

    #[must_use]
    pub fn generation(&self) -> SessionGeneration {
        self.generation
    }

    /// Structural invariants; a failure here is a bug in the state machine.
    pub(super) fn debug_check(&self) {
        let total = self.questions.len();
        debug_assert!(self.score <= total, "score {} > total {total}", self.score);
        debug_assert!(
            self.current_index <= total,
            "index {} > total {total}",
            self.current_index
        );
        debug_assert!(
            self.current_index < total || self.phase == SessionPhase::Finished || total == 0,
            "index reached the end without finishing"
        );
        debug_assert!(
            self.pending.is_none() || self.input_locked,
            "pending advance with input unlocked"
        );
    }
}
