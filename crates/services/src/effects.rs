//! Boundary between the session engine and whatever plays feedback effects.

use std::sync::{Arc, Mutex};

use quiz_core::model::{EffectEvent, EffectKind};

/// Receives presentation events from the engine.
///
/// The engine calls `emit` once per resolved question and once when the
/// session finishes. Receivers must not call back into the engine.
pub trait EffectEmitter: Send + Sync {
    fn emit(&self, event: EffectEvent);
}

impl<F> EffectEmitter for F
where
    F: Fn(EffectEvent) + Send + Sync,
{
    fn emit(&self, event: EffectEvent) {
        self(event);
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl EffectEmitter for NoopEmitter {
    fn emit(&self, _event: EffectEvent) {}
}

/// Writes every event to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEmitter;

impl EffectEmitter for LogEmitter {
    fn emit(&self, event: EffectEvent) {
        match event.kind {
            EffectKind::SessionEnd(summary) => log::info!(
                "effect: session end, {}/{} ({}%)",
                summary.score,
                summary.total,
                summary.percent()
            ),
            kind => log::info!("effect: {kind:?} on question {}", event.question_index),
        }
    }
}

/// Keeps every event in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmitter {
    events: Arc<Mutex<Vec<EffectEvent>>>,
}

impl RecordingEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    #[must_use]
    pub fn events(&self) -> Vec<EffectEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Removes and returns everything emitted so far.
    pub fn drain(&self) -> Vec<EffectEvent> {
        self.events
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Number of recorded events matching `kind`.
    #[must_use]
    pub fn count(&self, kind: EffectKind) -> usize {
        self.events().iter().filter(|e| e.kind == kind).count()
    }
}

impl EffectEmitter for RecordingEmitter {
    fn emit(&self, event: EffectEvent) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(event),
            Err(err) => log::warn!("dropping effect {:?}: {err}", event.kind),
        }
    }
}
