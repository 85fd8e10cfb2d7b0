//! Sound output seam.

use crate::sfx::Cue;

/// Plays sound cues.
///
/// Implementations must not block the caller for the duration of the sound
/// and must not panic; a sink that cannot play simply stays quiet.
pub trait SoundSink: Send + Sync {
    fn play(&self, cue: Cue);

    /// Cut off anything still playing.
    fn stop_all(&self);
}
