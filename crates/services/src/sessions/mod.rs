mod intent;
mod progress;
mod service;
mod state;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use intent::Intent;
pub use progress::SessionProgress;
pub use service::{QuizSession, SessionTransition};
pub use state::{AdvanceTicket, SessionPhase, SessionState};
pub use workflow::QuizLoopService;
