use quiz_core::model::{AnswerOutcome, Position};

use super::intent::Intent;
use super::progress::SessionProgress;
use super::service::{QuizSession, SessionTransition};
use crate::Clock;
use crate::error::SessionError;

/// Drives a `QuizSession` from a `Clock`.
///
/// This is the surface a frame loop talks to: it samples the clock once per
/// call and hands that instant to the session.
#[derive(Debug)]
pub struct QuizLoopService {
    clock: Clock,
    session: QuizSession,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, session: QuizSession) -> Self {
        Self { clock, session }
    }

    /// # Errors
    ///
    /// Returns `SessionError::Configuration` if there is nothing to ask.
    pub fn start(&mut self) -> Result<bool, SessionError> {
        let now = self.clock.now();
        self.session.start(now)
    }

    pub fn select(&mut self, option_index: usize) -> Option<AnswerOutcome> {
        let now = self.clock.now();
        self.session.select(option_index, now)
    }

    pub fn select_at(&mut self, option_index: usize, position: Position) -> Option<AnswerOutcome> {
        let now = self.clock.now();
        self.session.select_at(option_index, Some(position), now)
    }

    /// Call once per frame.
    pub fn tick(&mut self) -> Option<SessionTransition> {
        let now = self.clock.now();
        self.session.tick(now)
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// # Errors
    ///
    /// Propagates `QuizSession::apply` errors.
    pub fn apply(&mut self, intent: Intent) -> Result<Option<SessionTransition>, SessionError> {
        let now = self.clock.now();
        self.session.apply(intent, now)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.session.progress(self.clock.now())
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Mutable clock access, for stepping a fixed clock.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}
