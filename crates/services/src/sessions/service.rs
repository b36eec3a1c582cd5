use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use quiz_core::model::{
    AnswerOutcome, ConfigurationError, EffectEvent, OPTION_COUNT, Position, QuestionSpec,
    QuizSettings, QuizSummary, SessionGeneration,
};
use quiz_core::shuffle::shuffle_in_place;
use quiz_core::time::remaining_until;

use super::intent::Intent;
use super::progress::SessionProgress;
use super::state::{AdvanceTicket, SessionPhase, SessionState};
use crate::bank::QuestionBank;
use crate::effects::EffectEmitter;
use crate::error::SessionError;

//
// ─── TRANSITIONS ───────────────────────────────────────────────────────────────
//

/// What a call into the session changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTransition {
    Started,
    Answered(AnswerOutcome),
    TimedOut(AnswerOutcome),
    /// The resolution delay ended and the next question is up.
    Advanced { question_index: usize },
    Finished(QuizSummary),
    Restarted,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Timed multiple-choice quiz session.
///
/// Owns the question set and the `SessionState` and is the only thing that
/// mutates them. Every transition takes `now` from the caller; nothing here
/// sleeps or reads the clock, so a frame loop keeps running through the
/// post-answer delay and tests can drive time by hand.
pub struct QuizSession {
    bank: QuestionBank,
    settings: QuizSettings,
    emitter: Arc<dyn EffectEmitter>,
    rng: Box<dyn RngCore + Send>,
    state: SessionState,
}

impl QuizSession {
    /// Create an idle session seeded from the OS RNG.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Configuration` if the bank yields no questions.
    pub fn new(
        bank: QuestionBank,
        settings: QuizSettings,
        emitter: Arc<dyn EffectEmitter>,
    ) -> Result<Self, SessionError> {
        Self::with_rng(bank, settings, emitter, StdRng::from_os_rng())
    }

    /// Create an idle session using the given RNG for every shuffle.
    ///
    /// Options are shuffled per question and `max_questions` is applied here;
    /// question order is shuffled on `start`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Configuration` if the bank yields no questions.
    pub fn with_rng(
        bank: QuestionBank,
        settings: QuizSettings,
        emitter: Arc<dyn EffectEmitter>,
        rng: impl RngCore + Send + 'static,
    ) -> Result<Self, SessionError> {
        let mut rng: Box<dyn RngCore + Send> = Box::new(rng);
        let questions = bank.prepare(settings.max_questions(), &mut *rng);
        if questions.is_empty() {
            return Err(ConfigurationError::EmptyQuestionSet.into());
        }

        Ok(Self {
            bank,
            settings,
            emitter,
            rng,
            state: SessionState::new(questions, SessionGeneration::default()),
        })
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Begin the session: shuffle question order and start the first countdown.
    ///
    /// Returns `Ok(false)` without touching state unless the session is idle.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Configuration` if there is nothing to ask.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        if self.state.phase != SessionPhase::Idle {
            log::debug!("start ignored in {:?}", self.state.phase);
            return Ok(false);
        }
        if self.state.questions.is_empty() {
            return Err(ConfigurationError::EmptyQuestionSet.into());
        }

        shuffle_in_place(&mut self.state.questions, &mut *self.rng);
        self.state.phase = SessionPhase::Active;
        self.state.current_index = 0;
        self.state.score = 0;
        self.state.input_locked = false;
        self.state.pending = None;
        self.state.deadline = Some(now + self.settings.question_time());
        self.state.generation = self.state.generation.next();
        self.state.debug_check();

        log::info!(
            "session {} started with {} question(s)",
            self.state.generation,
            self.state.questions.len()
        );
        Ok(true)
    }

    /// Answer the current question. See `select_at`.
    pub fn select(&mut self, option_index: usize, now: DateTime<Utc>) -> Option<AnswerOutcome> {
        self.select_at(option_index, None, now)
    }

    /// Answer the current question, anchoring the effect at `position`.
    ///
    /// Ignored (returns `None`) unless the session is active and input is
    /// unlocked, so repeated clicks during the resolution delay score once.
    /// Option indices past the last option are ignored too.
    pub fn select_at(
        &mut self,
        option_index: usize,
        position: Option<Position>,
        now: DateTime<Utc>,
    ) -> Option<AnswerOutcome> {
        if self.state.phase != SessionPhase::Active {
            log::debug!("selection ignored in {:?}", self.state.phase);
            return None;
        }
        if self.state.input_locked {
            log::debug!("selection ignored while input is locked");
            return None;
        }
        if option_index >= OPTION_COUNT {
            log::warn!("selection ignored: option {option_index} does not exist");
            return None;
        }

        let question_index = self.state.current_index;
        let question = self.state.questions.get(question_index)?;
        let outcome =
            AnswerOutcome::answered(question_index, option_index, question.is_correct(option_index));
        self.resolve(outcome, position, now);
        Some(outcome)
    }

    /// Advance time.
    ///
    /// Fires a due post-answer advance, or resolves the current question as a
    /// timeout once its deadline has passed. Calling it again before the
    /// advance fires does nothing, so each deadline times out exactly once.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<SessionTransition> {
        if self.state.phase != SessionPhase::Active {
            return None;
        }

        if let Some(ticket) = self.state.pending {
            return ticket.is_due(now).then(|| self.advance(now));
        }
        if self.state.input_locked {
            return None;
        }

        let deadline = self.state.deadline?;
        if now < deadline {
            return None;
        }

        let outcome = AnswerOutcome::timed_out(self.state.current_index);
        self.resolve(outcome, None, now);
        Some(SessionTransition::TimedOut(outcome))
    }

    /// Fire a scheduled advance from an external timer instead of `tick`.
    ///
    /// Only the session's current pending ticket is honoured; tickets from a
    /// previous generation or already fired are ignored.
    pub fn fire_advance(
        &mut self,
        ticket: AdvanceTicket,
        now: DateTime<Utc>,
    ) -> Option<SessionTransition> {
        if self.state.pending != Some(ticket) {
            log::debug!(
                "stale advance ticket for question {} (generation {})",
                ticket.question_index,
                ticket.generation
            );
            return None;
        }
        Some(self.advance(now))
    }

    /// Throw the current run away and go back to idle.
    ///
    /// Valid from any phase. Options are reshuffled from the bank, counters
    /// reset and any pending advance is cancelled.
    pub fn restart(&mut self) {
        let generation = self.state.generation.next();
        let questions = self.bank.prepare(self.settings.max_questions(), &mut *self.rng);
        self.state = SessionState::new(questions, generation);
        log::info!("session restarted (generation {generation})");
    }

    /// Route a driver intent to the matching transition.
    ///
    /// # Errors
    ///
    /// Propagates `start` errors.
    pub fn apply(
        &mut self,
        intent: Intent,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionTransition>, SessionError> {
        let transition = match intent {
            Intent::Start => self.start(now)?.then_some(SessionTransition::Started),
            Intent::Select(index) => self.select(index, now).map(SessionTransition::Answered),
            Intent::Restart => {
                self.restart();
                Some(SessionTransition::Restarted)
            }
            Intent::Confirm => match self.state.phase {
                SessionPhase::Idle => self.start(now)?.then_some(SessionTransition::Started),
                SessionPhase::Finished => {
                    self.restart();
                    Some(SessionTransition::Restarted)
                }
                SessionPhase::Active => None,
            },
        };
        Ok(transition)
    }

    fn resolve(&mut self, outcome: AnswerOutcome, position: Option<Position>, now: DateTime<Utc>) {
        self.state.input_locked = true;
        if outcome.was_correct {
            self.state.score += 1;
        }
        self.state.pending = Some(AdvanceTicket {
            generation: self.state.generation,
            question_index: outcome.question_index,
            due: now + self.settings.resolution_delay(),
        });
        self.state.debug_check();

        log::debug!(
            "question {} resolved: {:?}",
            outcome.question_index,
            outcome.effect_kind()
        );
        self.emitter.emit(EffectEvent::for_outcome(&outcome, position));
    }

    fn advance(&mut self, now: DateTime<Utc>) -> SessionTransition {
        self.state.pending = None;
        self.state.current_index += 1;
        self.state.input_locked = false;

        let total = self.state.questions.len();
        let transition = if self.state.current_index >= total {
            self.state.phase = SessionPhase::Finished;
            self.state.deadline = None;
            let summary = QuizSummary::new(self.state.score, total);
            log::info!(
                "session {} finished: {}/{} ({}%)",
                self.state.generation,
                summary.score,
                summary.total,
                summary.percent()
            );
            self.emitter.emit(EffectEvent::session_end(summary));
            SessionTransition::Finished(summary)
        } else {
            self.state.deadline = Some(now + self.settings.question_time());
            SessionTransition::Advanced {
                question_index: self.state.current_index,
            }
        };

        self.state.debug_check();
        transition
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// The question on screen; `None` unless the session is active.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionSpec> {
        if self.state.phase == SessionPhase::Active {
            self.state.questions.get(self.state.current_index)
        } else {
            None
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.state.score
    }

    /// Number of questions in this run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.state.questions.len()
    }

    /// Countdown left on the current question; zero when none is running.
    #[must_use]
    pub fn remaining_time(&self, now: DateTime<Utc>) -> Duration {
        self.state
            .deadline
            .map_or_else(Duration::zero, |deadline| remaining_until(deadline, now))
    }

    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.state.input_locked
    }

    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.state.deadline
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.state.pending
    }

    #[must_use]
    pub fn generation(&self) -> SessionGeneration {
        self.state.generation
    }

    /// Final tally; `None` until the session has finished.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        (self.state.phase == SessionPhase::Finished)
            .then(|| QuizSummary::new(self.state.score, self.state.questions.len()))
    }

    #[must_use]
    pub fn progress(&self, now: DateTime<Utc>) -> SessionProgress {
        SessionProgress {
            phase: self.state.phase,
            current_index: self.state.current_index,
            total: self.state.questions.len(),
            score: self.state.score,
            remaining: self.remaining_time(now),
            question_time: self.settings.question_time(),
            input_locked: self.state.input_locked,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("bank_len", &self.bank.len())
            .field("settings", &self.settings)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::RecordingEmitter;
    use quiz_core::model::{EffectKind, QuestionRecord};
    use quiz_core::time::fixed_now;

    const DELAY_MS: i64 = 800;

    fn settings() -> QuizSettings {
        QuizSettings::new(
            Duration::seconds(15),
            Duration::milliseconds(DELAY_MS),
            Some(4),
        )
        .unwrap()
    }

    fn build_session(seed: u64) -> (QuizSession, RecordingEmitter) {
        let recorder = RecordingEmitter::new();
        let session = QuizSession::with_rng(
            QuestionBank::builtin(),
            settings(),
            Arc::new(recorder.clone()),
            StdRng::seed_from_u64(seed),
        )
        .unwrap();
        (session, recorder)
    }

    fn wrong_option(session: &QuizSession) -> usize {
        let correct = session.current_question().unwrap().correct_index();
        (correct + 1) % OPTION_COUNT
    }

    fn after(ms: i64) -> DateTime<Utc> {
        fixed_now() + Duration::milliseconds(ms)
    }

    #[test]
    fn new_session_is_idle() {
        let (session, recorder) = build_session(1);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.total(), 4);
        assert!(session.current_question().is_none());
        assert!(session.deadline().is_none());
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn empty_bank_is_a_configuration_error() {
        let err = QuizSession::with_rng(
            QuestionBank::default(),
            settings(),
            Arc::new(RecordingEmitter::new()),
            StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SessionError::Configuration(ConfigurationError::EmptyQuestionSet)
        );
    }

    #[test]
    fn max_questions_caps_the_run() {
        let settings =
            QuizSettings::new(Duration::seconds(5), Duration::zero(), Some(2)).unwrap();
        let session = QuizSession::with_rng(
            QuestionBank::builtin(),
            settings,
            Arc::new(RecordingEmitter::new()),
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        assert_eq!(session.total(), 2);
    }

    #[test]
    fn start_sets_deadline_and_is_a_noop_when_active() {
        let (mut session, _) = build_session(2);
        assert!(session.start(fixed_now()).unwrap());
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.deadline(), Some(after(15_000)));
        assert_eq!(session.remaining_time(after(5_000)), Duration::seconds(10));

        let generation = session.generation();
        assert!(!session.start(after(1_000)).unwrap());
        assert_eq!(session.deadline(), Some(after(15_000)));
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn correct_answer_scores_and_emits_once() {
        let (mut session, recorder) = build_session(3);
        session.start(fixed_now()).unwrap();
        let correct = session.current_question().unwrap().correct_index();

        let outcome = session.select(correct, after(100)).unwrap();
        assert!(outcome.was_correct);
        assert_eq!(outcome.chosen_index, Some(correct));
        assert_eq!(session.score(), 1);
        assert!(session.is_input_locked());
        assert_eq!(recorder.count(EffectKind::Correct), 1);
    }

    #[test]
    fn double_select_during_delay_scores_once() {
        let (mut session, recorder) = build_session(4);
        session.start(fixed_now()).unwrap();
        let correct = session.current_question().unwrap().correct_index();

        assert!(session.select(correct, after(100)).is_some());
        assert!(session.select(correct, after(101)).is_none());
        assert!(session.select(correct, after(500)).is_none());
        assert_eq!(session.score(), 1);
        assert_eq!(recorder.events().len(), 1);
    }

    #[test]
    fn wrong_answer_emits_incorrect_and_keeps_score() {
        let (mut session, recorder) = build_session(5);
        session.start(fixed_now()).unwrap();
        let wrong = wrong_option(&session);

        let outcome = session.select(wrong, after(100)).unwrap();
        assert!(!outcome.was_correct);
        assert_eq!(session.score(), 0);
        assert_eq!(recorder.count(EffectKind::Incorrect), 1);
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let (mut session, recorder) = build_session(6);
        session.start(fixed_now()).unwrap();
        assert!(session.select(OPTION_COUNT, after(10)).is_none());
        assert!(!session.is_input_locked());
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn select_before_start_is_ignored() {
        let (mut session, recorder) = build_session(7);
        assert!(session.select(0, fixed_now()).is_none());
        assert_eq!(session.score(), 0);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn advance_waits_for_resolution_delay() {
        let (mut session, _) = build_session(8);
        session.start(fixed_now()).unwrap();
        session.select(0, after(1_000)).unwrap();

        assert_eq!(session.tick(after(1_000 + DELAY_MS - 1)), None);
        assert_eq!(session.current_index(), 0);

        let transition = session.tick(after(1_000 + DELAY_MS));
        assert_eq!(transition, Some(SessionTransition::Advanced { question_index: 1 }));
        assert_eq!(session.current_index(), 1);
        assert!(!session.is_input_locked());
        assert_eq!(
            session.deadline(),
            Some(after(1_000 + DELAY_MS + 15_000))
        );
    }

    #[test]
    fn expired_deadline_times_out_exactly_once() {
        let (mut session, recorder) = build_session(9);
        session.start(fixed_now()).unwrap();

        assert_eq!(session.tick(after(14_999)), None);
        let transition = session.tick(after(15_000));
        let Some(SessionTransition::TimedOut(outcome)) = transition else {
            panic!("expected timeout, got {transition:?}");
        };
        assert_eq!(outcome.chosen_index, None);
        assert!(!outcome.was_correct);

        assert_eq!(session.tick(after(15_000)), None);
        assert_eq!(session.tick(after(15_500)), None);
        assert_eq!(recorder.count(EffectKind::Timeout), 1);
        assert!(session.select(0, after(15_600)).is_none());
    }

    #[test]
    fn all_correct_finishes_with_full_marks() {
        let (mut session, recorder) = build_session(10);
        session.start(fixed_now()).unwrap();

        let mut now = fixed_now();
        for _ in 0..4 {
            now += Duration::seconds(2);
            let correct = session.current_question().unwrap().correct_index();
            session.select(correct, now).unwrap();
            now += Duration::milliseconds(DELAY_MS);
            session.tick(now).unwrap();
        }

        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(session.current_index(), 4);
        assert_eq!(session.score(), 4);
        let summary = session.summary().unwrap();
        assert_eq!(summary.percent(), 100);
        assert!(session.current_question().is_none());
        assert!(session.deadline().is_none());

        let events = recorder.events();
        assert_eq!(events.len(), 5);
        assert_eq!(events[4].kind, EffectKind::SessionEnd(summary));
    }

    #[test]
    fn finished_session_ignores_ticks_and_selects() {
        let (mut session, recorder) = build_session(11);
        session.start(fixed_now()).unwrap();
        let mut now = fixed_now();
        for _ in 0..4 {
            now += Duration::seconds(16);
            session.tick(now).unwrap();
            now += Duration::milliseconds(DELAY_MS);
            session.tick(now).unwrap();
        }
        assert_eq!(session.phase(), SessionPhase::Finished);
        let before = recorder.events().len();

        assert_eq!(session.tick(now + Duration::seconds(60)), None);
        assert!(session.select(0, now).is_none());
        assert_eq!(recorder.events().len(), before);
        assert_eq!(session.summary().unwrap().percent(), 0);
    }

    #[test]
    fn restart_cancels_pending_advance() {
        let (mut session, _) = build_session(12);
        session.start(fixed_now()).unwrap();
        session.select(0, after(100)).unwrap();
        let ticket = session.pending_advance().unwrap();

        session.restart();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.pending_advance().is_none());
        assert_eq!(session.fire_advance(ticket, after(5_000)), None);

        session.start(after(200)).unwrap();
        assert_eq!(session.tick(after(100 + DELAY_MS)), None);
        assert_eq!(session.fire_advance(ticket, after(100 + DELAY_MS)), None);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_input_locked());
    }

    #[test]
    fn fire_advance_honours_only_the_current_ticket() {
        let (mut session, _) = build_session(13);
        session.start(fixed_now()).unwrap();
        session.select(1, after(100)).unwrap();
        let ticket = session.pending_advance().unwrap();
        assert_eq!(ticket.question_index, 0);
        assert_eq!(ticket.due, after(100 + DELAY_MS));

        assert_eq!(
            session.fire_advance(ticket, ticket.due),
            Some(SessionTransition::Advanced { question_index: 1 })
        );
        assert_eq!(session.fire_advance(ticket, ticket.due), None);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn restart_resets_counters_and_reshuffles() {
        let (mut session, _) = build_session(14);
        session.start(fixed_now()).unwrap();
        let correct = session.current_question().unwrap().correct_index();
        session.select(correct, after(10)).unwrap();
        session.tick(after(10 + DELAY_MS)).unwrap();
        let generation = session.generation();

        session.restart();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_input_locked());
        assert!(session.deadline().is_none());
        assert!(session.generation() > generation);
        assert_eq!(session.total(), 4);
        for question in session.state().questions() {
            let record = QuestionBank::builtin()
                .records()
                .iter()
                .find(|r: &&QuestionRecord| r.prompt() == question.prompt())
                .cloned()
                .unwrap();
            assert_eq!(question.correct_text(), record.correct_text());
        }
    }

    #[test]
    fn confirm_starts_then_restarts() {
        let (mut session, _) = build_session(15);
        assert_eq!(
            session.apply(Intent::Confirm, fixed_now()).unwrap(),
            Some(SessionTransition::Started)
        );
        assert_eq!(session.apply(Intent::Confirm, after(10)).unwrap(), None);
        assert_eq!(session.apply(Intent::Start, after(10)).unwrap(), None);

        let mut now = fixed_now();
        while session.phase() == SessionPhase::Active {
            now += Duration::seconds(1);
            session.apply(Intent::Select(0), now).unwrap();
            now += Duration::milliseconds(DELAY_MS);
            session.tick(now);
        }
        assert_eq!(
            session.apply(Intent::Confirm, now).unwrap(),
            Some(SessionTransition::Restarted)
        );
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn zero_delay_advances_on_next_tick() {
        let settings = QuizSettings::new(Duration::seconds(3), Duration::zero(), None).unwrap();
        let mut session = QuizSession::with_rng(
            QuestionBank::builtin(),
            settings,
            Arc::new(RecordingEmitter::new()),
            StdRng::seed_from_u64(16),
        )
        .unwrap();
        session.start(fixed_now()).unwrap();
        session.select(0, after(10)).unwrap();
        assert!(matches!(
            session.tick(after(10)),
            Some(SessionTransition::Advanced { question_index: 1 })
        ));
    }

    #[test]
    fn progress_reports_countdown() {
        let (mut session, _) = build_session(17);
        session.start(fixed_now()).unwrap();
        let progress = session.progress(after(7_500));
        assert_eq!(progress.phase, SessionPhase::Active);
        assert_eq!(progress.question_number(), 1);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.countdown_secs(), 8);
        assert!((progress.time_fraction() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn select_at_forwards_position() {
        let (mut session, recorder) = build_session(18);
        session.start(fixed_now()).unwrap();
        session
            .select_at(2, Some(Position::new(4.0, 8.0)), after(50))
            .unwrap();
        let events = recorder.events();
        assert_eq!(events[0].position, Some(Position::new(4.0, 8.0)));
        assert_eq!(events[0].question_index, 0);
    }

    #[test]
    fn longest_allowed_timings_run_without_overflow() {
        let day = Duration::seconds(quiz_core::model::MAX_TIMING_SECS);
        let settings = QuizSettings::new(day, day, Some(1)).unwrap();
        let mut session = QuizSession::with_rng(
            QuestionBank::builtin(),
            settings,
            Arc::new(RecordingEmitter::new()),
            StdRng::seed_from_u64(19),
        )
        .unwrap();
        session.start(fixed_now()).unwrap();
        assert_eq!(session.deadline(), Some(fixed_now() + day));

        let timeout_at = fixed_now() + day;
        assert!(matches!(
            session.tick(timeout_at),
            Some(SessionTransition::TimedOut(_))
        ));
        assert!(matches!(
            session.tick(timeout_at + day),
            Some(SessionTransition::Finished(_))
        ));
    }

    #[test]
    fn oversized_question_time_never_reaches_the_engine() {
        let err = quiz_core::model::QuizSettingsDraft {
            question_time_secs: Some(i64::MAX / 1000),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::QuestionTimeOutOfRange { .. }
        ));
    }
}
