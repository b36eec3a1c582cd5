use chrono::Duration;
use thiserror::Error;

pub const DEFAULT_QUESTION_TIME_SECS: i64 = 15;
pub const DEFAULT_RESOLUTION_DELAY_MS: i64 = 800;
/// Question cap used by the classic four-question round.
pub const CLASSIC_MAX_QUESTIONS: usize = 4;
/// Longest accepted question time or resolution delay.
pub const MAX_TIMING_SECS: i64 = 24 * 60 * 60;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("question time must be > 0 (got {millis} ms)")]
    NonPositiveQuestionTime { millis: i64 },

    #[error("question time must be at most one day (got {millis} ms)")]
    QuestionTimeOutOfRange { millis: i64 },

    #[error("resolution delay must be >= 0 (got {millis} ms)")]
    NegativeResolutionDelay { millis: i64 },

    #[error("resolution delay must be at most one day (got {millis} ms)")]
    ResolutionDelayOutOfRange { millis: i64 },

    #[error("max questions must be > 0 when set")]
    ZeroMaxQuestions,

    #[error("question set is empty")]
    EmptyQuestionSet,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Timing and sizing knobs for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    question_time: Duration,
    resolution_delay: Duration,
    max_questions: Option<usize>,
}

impl QuizSettings {
    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the question time is not positive, the
    /// resolution delay is negative, either exceeds `MAX_TIMING_SECS`, or
    /// `max_questions` is `Some(0)`.
    pub fn new(
        question_time: Duration,
        resolution_delay: Duration,
        max_questions: Option<usize>,
    ) -> Result<Self, ConfigurationError> {
        if question_time <= Duration::zero() {
            return Err(ConfigurationError::NonPositiveQuestionTime {
                millis: question_time.num_milliseconds(),
            });
        }
        let max = Duration::seconds(MAX_TIMING_SECS);
        if question_time > max {
            return Err(ConfigurationError::QuestionTimeOutOfRange {
                millis: question_time.num_milliseconds(),
            });
        }
        if resolution_delay < Duration::zero() {
            return Err(ConfigurationError::NegativeResolutionDelay {
                millis: resolution_delay.num_milliseconds(),
            });
        }
        if resolution_delay > max {
            return Err(ConfigurationError::ResolutionDelayOutOfRange {
                millis: resolution_delay.num_milliseconds(),
            });
        }
        if max_questions == Some(0) {
            return Err(ConfigurationError::ZeroMaxQuestions);
        }

        Ok(Self {
            question_time,
            resolution_delay,
            max_questions,
        })
    }

    /// The classic round: 15 s per question, 800 ms feedback, four questions.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            max_questions: Some(CLASSIC_MAX_QUESTIONS),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn question_time(&self) -> Duration {
        self.question_time
    }

    #[must_use]
    pub fn resolution_delay(&self) -> Duration {
        self.resolution_delay
    }

    #[must_use]
    pub fn max_questions(&self) -> Option<usize> {
        self.max_questions
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_time: Duration::seconds(DEFAULT_QUESTION_TIME_SECS),
            resolution_delay: Duration::milliseconds(DEFAULT_RESOLUTION_DELAY_MS),
            max_questions: None,
        }
    }
}

/// Raw, unvalidated settings as read from flags or the environment.
#[derive(Clone, Debug, Default)]
pub struct QuizSettingsDraft {
    pub question_time_secs: Option<i64>,
    pub resolution_delay_ms: Option<i64>,
    pub max_questions: Option<usize>,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill unset fields with defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for out-of-range values.
    pub fn validate(self) -> Result<QuizSettings, ConfigurationError> {
        let question_time_secs = self
            .question_time_secs
            .unwrap_or(DEFAULT_QUESTION_TIME_SECS);
        let resolution_delay_ms = self
            .resolution_delay_ms
            .unwrap_or(DEFAULT_RESOLUTION_DELAY_MS);
        let question_time = Duration::try_seconds(question_time_secs).ok_or_else(|| {
            let millis = question_time_secs.saturating_mul(1000);
            if question_time_secs <= 0 {
                ConfigurationError::NonPositiveQuestionTime { millis }
            } else {
                ConfigurationError::QuestionTimeOutOfRange { millis }
            }
        })?;
        let resolution_delay = Duration::try_milliseconds(resolution_delay_ms).ok_or_else(|| {
            let millis = resolution_delay_ms;
            if millis < 0 {
                ConfigurationError::NegativeResolutionDelay { millis }
            } else {
                ConfigurationError::ResolutionDelayOutOfRange { millis }
            }
        })?;

        QuizSettings::new(question_time, resolution_delay, self.max_questions)
    }
}
