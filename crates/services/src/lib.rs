#![forbid(unsafe_code)]

pub mod bank;
pub mod effects;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use bank::QuestionBank;
pub use effects::{EffectEmitter, LogEmitter, NoopEmitter, RecordingEmitter};
pub use error::{BankError, ParseError, ParseErrorKind, SessionError};

pub use sessions::{
    AdvanceTicket, Intent, QuizLoopService, QuizSession, SessionPhase, SessionProgress,
    SessionTransition,
};
