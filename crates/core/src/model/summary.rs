use serde::Serialize;

/// Final tally of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
}

/// Closing remark shown with the final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Remark {
    Excellent,
    Great,
    KeepTrying,
}

impl QuizSummary {
    #[must_use]
    pub fn new(score: usize, total: usize) -> Self {
        debug_assert!(score <= total, "score {score} exceeds total {total}");
        Self { score, total }
    }

    /// `round(score / total * 100)`, halves rounded away from zero.
    ///
    /// An empty session reports 0.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let score = self.score.min(self.total) as u64;
        let total = self.total as u64;
        // (2 * 100 * s + t) / (2 * t) == floor(100 * s / t + 1/2)
        let rounded = (200 * score + total) / (2 * total);
        u32::try_from(rounded).unwrap_or(100)
    }

    #[must_use]
    pub fn remark(&self) -> Remark {
        match self.percent() {
            100 => Remark::Excellent,
            75..=99 => Remark::Great,
            _ => Remark::KeepTrying,
        }
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }
}

impl Remark {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Remark::Excellent => "excellent",
            Remark::Great => "great",
            Remark::KeepTrying => "keep trying",
        }
    }
}
