//! Sound sink that records instead of playing.

use std::sync::{Arc, Mutex, PoisonError};

use crate::sfx::Cue;
use crate::traits::SoundSink;

/// What a [`RecordingSink`] was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    Played(Cue),
    StoppedAll,
}

/// Records every call for later assertions. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Cues played, in order.
    pub fn played(&self) -> Vec<Cue> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Played(cue) => Some(cue),
                SinkEvent::StoppedAll => None,
            })
            .collect()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played().into_iter().filter(|c| *c == cue).count()
    }

    fn push(&self, event: SinkEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl SoundSink for RecordingSink {
    fn play(&self, cue: Cue) {
        self.push(SinkEvent::Played(cue));
    }

    fn stop_all(&self) {
        self.push(SinkEvent::StoppedAll);
    }
}
