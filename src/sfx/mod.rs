//! Sound cues.
//!
//! Four short synthesized tones mark the moments of a conversation turn:
//! a click when a question is sent, a blip per revealed chunk, a chime when
//! the reveal completes and a buzz on error. [`Sfx`] gates them behind the
//! user's on/off preference and forwards to a [`SoundSink`].

pub mod wav;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::adapters::NullSink;
use crate::traits::SoundSink;

/// Playback volume applied to every cue.
pub const VOLUME: f64 = 0.25;

/// A named sound cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Per-chunk typing blip.
    Blip,
    /// Question sent.
    Click,
    /// Reveal finished.
    Chime,
    /// Answer failed.
    Buzz,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Blip, Cue::Click, Cue::Chime, Cue::Buzz];

    pub fn frequency(&self) -> f64 {
        match self {
            Cue::Blip => 880.0,
            Cue::Click => 220.0,
            Cue::Chime => 660.0,
            Cue::Buzz => 120.0,
        }
    }

    pub fn seconds(&self) -> f64 {
        match self {
            Cue::Blip => 0.04,
            Cue::Click => 0.03,
            Cue::Chime => 0.12,
            Cue::Buzz => 0.2,
        }
    }

    /// Complete WAV file for this cue at [`VOLUME`].
    pub fn wav(&self) -> Vec<u8> {
        let mut pcm = wav::tone(self.frequency(), self.seconds());
        wav::apply_volume(&mut pcm, VOLUME);
        wav::wav_bytes(&pcm, wav::SAMPLE_RATE)
    }
}

/// Sound effects switchboard. Clones share the sink and the on/off flag,
/// so a toggle is seen by typewriter hooks holding their own clone.
#[derive(Clone)]
pub struct Sfx {
    sink: Arc<dyn SoundSink>,
    enabled: Arc<AtomicBool>,
}

impl std::fmt::Debug for Sfx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sfx")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

impl Sfx {
    pub fn new(sink: Arc<dyn SoundSink>, enabled: bool) -> Self {
        Self {
            sink,
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    /// Sfx that never makes a sound.
    pub fn silent() -> Self {
        Self::new(Arc::new(NullSink), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Flip the preference and return the new value.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::SeqCst)
    }

    /// Play `cue` if sound is on.
    pub fn play(&self, cue: Cue) {
        if self.is_enabled() {
            self.sink.play(cue);
        }
    }

    /// Silence anything still playing if sound is on.
    pub fn stop_all(&self) {
        if self.is_enabled() {
            self.sink.stop_all();
        }
    }

    /// Header label for the toggle.
    pub fn label(&self) -> &'static str {
        if self.is_enabled() {
            "SFX: ON"
        } else {
            "SFX: OFF"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{RecordingSink, SinkEvent};

    #[test]
    fn test_cue_wav_lengths() {
        assert_eq!(Cue::Blip.wav().len(), wav::HEADER_LEN + 320);
        assert_eq!(Cue::Click.wav().len(), wav::HEADER_LEN + 240);
        assert_eq!(Cue::Chime.wav().len(), wav::HEADER_LEN + 960);
        assert_eq!(Cue::Buzz.wav().len(), wav::HEADER_LEN + 1600);
    }

    #[test]
    fn test_disabled_sfx_is_quiet() {
        let sink = RecordingSink::new();
        let sfx = Sfx::new(Arc::new(sink.clone()), false);

        sfx.play(Cue::Chime);
        sfx.stop_all();

        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_toggle_is_shared_between_clones() {
        let sink = RecordingSink::new();
        let sfx = Sfx::new(Arc::new(sink.clone()), true);
        let hook_copy = sfx.clone();

        assert_eq!(sfx.label(), "SFX: ON");
        assert!(!sfx.toggle());
        assert_eq!(sfx.label(), "SFX: OFF");
        hook_copy.play(Cue::Blip);
        assert!(sink.events().is_empty());

        assert!(sfx.toggle());
        hook_copy.play(Cue::Blip);
        sfx.stop_all();
        assert_eq!(
            sink.events(),
            vec![SinkEvent::Played(Cue::Blip), SinkEvent::StoppedAll]
        );
    }
}
