mod ids;
mod outcome;
mod question;
mod settings;
mod summary;

pub use ids::SessionGeneration;
pub use outcome::{AnswerOutcome, EffectEvent, EffectKind, Position};
pub use question::{
    AnswerChoice, OPTION_COUNT, QuestionError, QuestionRecord, QuestionSpec, option_label,
};
pub use settings::{
    CLASSIC_MAX_QUESTIONS, ConfigurationError, DEFAULT_QUESTION_TIME_SECS,
    DEFAULT_RESOLUTION_DELAY_MS, MAX_TIMING_SECS, QuizSettings, QuizSettingsDraft,
};
pub use summary::{QuizSummary, Remark};
