//! Pacing configuration for the typewriter.

use std::time::Duration;

/// Default minimum number of characters revealed per step.
pub const DEFAULT_MIN_CHUNK: usize = 3;

/// Default maximum number of characters revealed per step.
pub const DEFAULT_MAX_CHUNK: usize = 6;

/// Default pause between chunks before punctuation multipliers apply.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

/// Pacing configuration for a [`Typewriter`](super::Typewriter).
///
/// Chunk bounds are normalised on construction so that every emitted chunk
/// is between one character and `max_chunk` characters long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterConfig {
    min_chunk: usize,
    max_chunk: usize,
    interval: Duration,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            min_chunk: DEFAULT_MIN_CHUNK,
            max_chunk: DEFAULT_MAX_CHUNK,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl TypewriterConfig {
    /// Create a config from explicit bounds and base interval.
    ///
    /// `max_chunk` is raised to at least 1 and `min_chunk` is clamped into
    /// `[1, max_chunk]`.
    pub fn new(min_chunk: usize, max_chunk: usize, interval: Duration) -> Self {
        let max_chunk = max_chunk.max(1);
        let min_chunk = min_chunk.clamp(1, max_chunk);
        Self {
            min_chunk,
            max_chunk,
            interval,
        }
    }

    /// Set the chunk bounds, keeping the interval.
    pub fn with_chunk_range(self, min_chunk: usize, max_chunk: usize) -> Self {
        Self::new(min_chunk, max_chunk, self.interval)
    }

    /// Set the base interval, keeping the chunk bounds.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn min_chunk(&self) -> usize {
        self.min_chunk
    }

    pub fn max_chunk(&self) -> usize {
        self.max_chunk
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
