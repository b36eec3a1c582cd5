use chrono::Duration;

use super::state::SessionPhase;

/// Read-only snapshot of a session, for drawing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub phase: SessionPhase,
    pub current_index: usize,
    pub total: usize,
    pub score: usize,
    pub remaining: Duration,
    pub question_time: Duration,
    pub input_locked: bool,
}

impl SessionProgress {
    /// Share of the countdown left, `0.0..=1.0`, for a timer bar.
    #[must_use]
    pub fn time_fraction(&self) -> f32 {
        let total = self.question_time.num_milliseconds();
        if total <= 0 {
            return 0.0;
        }
        let left = self.remaining.num_milliseconds().clamp(0, total);
        left as f32 / total as f32
    }

    /// Whole seconds left on the countdown, rounded up.
    #[must_use]
    pub fn countdown_secs(&self) -> i64 {
        quiz_core::time::countdown_seconds(self.remaining)
    }

    /// 1-based question number for headers, clamped to `total`.
    #[must_use]
    pub fn question_number(&self) -> usize {
        (self.current_index + 1).min(self.total)
    }
}
