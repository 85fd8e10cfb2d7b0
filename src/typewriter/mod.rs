//! Incremental text reveal with typing cadence.
//!
//! A [`Typewriter`] takes a complete string and hands a growing prefix of it
//! to a callback, a few characters at a time, pausing longer after sentence
//! and clause punctuation. A reveal can be cut short with [`Typewriter::stop`];
//! the caller then renders the full text itself if it wants to.
//!
//! # Cancellation
//!
//! Cancellation is cooperative. `stop()` bumps a shared epoch and every reveal
//! compares the epoch it started under against the current one once per
//! chunk boundary. A reveal starts when [`Typewriter::type_text`] or
//! [`Typewriter::into_reveal`] is called, before its future is first polled. A chunk already being emitted when `stop()` is called is
//! still delivered, so at most one `on_update` may follow a `stop()`. A
//! cancelled reveal never runs the `on_done` hook.
//!
//! The typewriter does not serialise reveals. Two reveals started from the
//! same instance run independently, each with its own accumulator; keeping a
//! single reveal per display region is the caller's job.
//!
//! # Example
//!
//! ```no_run
//! use retrochat::typewriter::{Typewriter, TypewriterConfig};
//!
//! # async fn demo() {
//! let typewriter = Typewriter::new(TypewriterConfig::default())
//!     .on_done(|| tracing::info!("done"));
//! typewriter
//!     .type_text("Hello, adventurer!", |partial| println!("{partial}"))
//!     .await;
//! # }
//! ```

mod config;

pub use config::{TypewriterConfig, DEFAULT_INTERVAL, DEFAULT_MAX_CHUNK, DEFAULT_MIN_CHUNK};

use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Delay multiplier after `.`, `!` or `?`.
pub const SENTENCE_PAUSE: u32 = 6;

/// Delay multiplier after `,`, `:` or `;`.
pub const CLAUSE_PAUSE: u32 = 3;

type ChunkHook = Arc<dyn Fn(&str) + Send + Sync>;
type DoneHook = Arc<dyn Fn() + Send + Sync>;

/// How a reveal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Every character was revealed and the `on_done` hook ran.
    Completed,
    /// `stop()` was observed before the text was exhausted.
    Cancelled,
}

/// Reveals text progressively. Cheap to clone; clones share the
/// cancellation epoch, hooks and random source.
#[derive(Clone)]
pub struct Typewriter {
    config: TypewriterConfig,
    on_chunk: Option<ChunkHook>,
    on_done: Option<DoneHook>,
    epoch: Arc<AtomicU64>,
    rng: Arc<Mutex<StdRng>>,
}

impl std::fmt::Debug for Typewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typewriter")
            .field("config", &self.config)
            .field("on_chunk", &self.on_chunk.is_some())
            .field("on_done", &self.on_done.is_some())
            .field("epoch", &self.epoch.load(Ordering::SeqCst))
            .finish()
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(TypewriterConfig::default())
    }
}

impl Typewriter {
    /// Create a typewriter drawing chunk sizes from OS entropy.
    pub fn new(config: TypewriterConfig) -> Self {
        Self {
            config,
            on_chunk: None,
            on_done: None,
            epoch: Arc::new(AtomicU64::new(0)),
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Use a seeded random source so chunk sizes are reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    /// Register a hook that receives each newly revealed slice.
    pub fn on_chunk<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_chunk = Some(Arc::new(hook));
        self
    }

    /// Register a hook that runs once when a reveal completes.
    pub fn on_done<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_done = Some(Arc::new(hook));
        self
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    /// Reveal `text`, calling `on_update` with the growing prefix after
    /// every chunk.
    ///
    /// The reveal counts as started when this is called, not when the
    /// returned future is first polled: a `stop()` issued in between cancels
    /// it. The future resolves once the whole text has been shown or such a
    /// `stop()` has been observed. Empty text completes at once without
    /// calling `on_update`.
    pub fn type_text<'a, F>(
        &'a self,
        text: &'a str,
        on_update: F,
    ) -> impl Future<Output = RevealOutcome> + 'a
    where
        F: FnMut(&str) + 'a,
    {
        let epoch = self.epoch.load(Ordering::SeqCst);
        self.run(text, epoch, on_update)
    }

    /// Owned form of [`Typewriter::type_text`] for handing to `tokio::spawn`.
    /// The reveal starts when this is called.
    pub fn into_reveal<F>(
        self,
        text: String,
        on_update: F,
    ) -> impl Future<Output = RevealOutcome> + Send + 'static
    where
        F: FnMut(&str) + Send + 'static,
    {
        let epoch = self.epoch.load(Ordering::SeqCst);
        async move { self.run(&text, epoch, on_update).await }
    }

    async fn run<F>(&self, text: &str, epoch: u64, mut on_update: F) -> RevealOutcome
    where
        F: FnMut(&str),
    {
        let mut session = RevealSession::new(text, epoch);
        tracing::debug!(chars = session.remaining(), "reveal started");

        while !session.is_complete() && !self.is_cancelled(&session) {
            let n = self.next_chunk_len(session.remaining());
            let chunk = session.advance(n);
            let revealed = session.revealed();

            on_update(revealed);
            if let Some(hook) = &self.on_chunk {
                run_hook("on_chunk", || hook(chunk));
            }

            tokio::time::sleep(self.delay_after(revealed)).await;
        }

        if self.is_cancelled(&session) {
            tracing::debug!(
                revealed = session.revealed().len(),
                total = text.len(),
                "reveal cancelled"
            );
            return RevealOutcome::Cancelled;
        }

        if let Some(hook) = &self.on_done {
            run_hook("on_done", || hook());
        }
        tracing::debug!("reveal completed");
        RevealOutcome::Completed
    }

    /// Ask every reveal started so far to stop at its next chunk boundary.
    ///
    /// Safe to call repeatedly or while nothing is running.
    pub fn stop(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Pause that follows a chunk, given everything revealed so far.
    pub fn delay_after(&self, revealed: &str) -> Duration {
        let base = self.config.interval();
        let factor = match revealed.chars().last() {
            Some('.' | '!' | '?') => SENTENCE_PAUSE,
            Some(',' | ':' | ';') => CLAUSE_PAUSE,
            _ => 1,
        };
        base.checked_mul(factor).unwrap_or(Duration::MAX)
    }

    fn is_cancelled(&self, session: &RevealSession<'_>) -> bool {
        self.epoch.load(Ordering::SeqCst) != session.epoch
    }

    fn next_chunk_len(&self, remaining: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let n = rng.gen_range(self.config.min_chunk()..=self.config.max_chunk());
        n.min(remaining)
    }
}

/// Run a cosmetic hook, swallowing panics so they cannot abort a reveal.
fn run_hook(name: &str, hook: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(hook)).is_err() {
        tracing::warn!(hook = name, "typewriter hook panicked; continuing");
    }
}

/// State of one reveal: the source text and how much of it is out.
#[derive(Debug)]
struct RevealSession<'a> {
    text: &'a str,
    /// Byte offset of the end of the revealed prefix.
    end: usize,
    /// Characters not yet revealed.
    remaining: usize,
    epoch: u64,
}

impl<'a> RevealSession<'a> {
    fn new(text: &'a str, epoch: u64) -> Self {
        Self {
            text,
            end: 0,
            remaining: text.chars().count(),
            epoch,
        }
    }

    fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    fn remaining(&self) -> usize {
        self.remaining
    }

    fn revealed(&self) -> &'a str {
        &self.text[..self.end]
    }

    /// Reveal up to `n` more characters and return just the new slice.
    fn advance(&mut self, n: usize) -> &'a str {
        let n = n.min(self.remaining);
        let start = self.end;
        let len: usize = self.text[start..]
            .chars()
            .take(n)
            .map(char::len_utf8)
            .sum();
        self.end += len;
        self.remaining -= n;
        &self.text[start..self.end]
    }
}
