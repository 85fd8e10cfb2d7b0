//! Sound sinks.
//!
//! A terminal has no mixer, so there are two real outputs: the terminal bell
//! for the cues that matter (completion and error) and an external player
//! process fed the synthesized WAV on stdin (`aplay -q -`, `paplay`, ...).

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, PoisonError};

use crate::sfx::Cue;
use crate::traits::SoundSink;

/// Swallows every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&self, _cue: Cue) {}

    fn stop_all(&self) {}
}

/// Rings the terminal bell for [`Cue::Chime`] and [`Cue::Buzz`].
///
/// Blips and clicks stay silent: a bell per typed chunk is unbearable.
#[derive(Debug)]
pub struct TerminalBell<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalBell<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> SoundSink for TerminalBell<W> {
    fn play(&self, cue: Cue) {
        if !matches!(cue, Cue::Chime | Cue::Buzz) {
            return;
        }
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }

    fn stop_all(&self) {}
}

/// Pipes each cue's WAV into a freshly spawned player process.
#[derive(Debug)]
pub struct PlayerCommandSink {
    program: String,
    args: Vec<String>,
    children: Mutex<Vec<Child>>,
}

impl PlayerCommandSink {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            children: Mutex::new(Vec::new()),
        }
    }

    /// Build from a whitespace-separated command line such as `aplay -q -`.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn spawn(&self, wav: &[u8]) -> std::io::Result<Child> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        feed(child, wav)
    }
}

/// Write `wav` to the player's stdin. A player that cannot take it is killed
/// and reaped before the error is returned.
fn feed(mut child: Child, wav: &[u8]) -> std::io::Result<Child> {
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(wav) {
            drop(stdin);
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
    }
    Ok(child)
}

impl SoundSink for PlayerCommandSink {
    fn play(&self, cue: Cue) {
        let mut children = self
            .children
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        children.retain_mut(|child| matches!(child.try_wait(), Ok(None)));

        match self.spawn(&cue.wav()) {
            Ok(child) => children.push(child),
            Err(e) => tracing::debug!(program = %self.program, error = %e, "sound player failed"),
        }
    }

    fn stop_all(&self) {
        let mut children = self
            .children
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for child in children.iter_mut() {
            let _ = child.kill();
            let _ = child.wait();
        }
        children.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_rings_only_for_chime_and_buzz() {
        let bell = TerminalBell::new(Vec::new());
        for cue in Cue::ALL {
            bell.play(cue);
        }
        assert_eq!(bell.into_inner(), b"\x07\x07".to_vec());
    }

    #[test]
    fn test_parse_command_line() {
        let sink = PlayerCommandSink::parse("aplay -q -").unwrap();
        assert_eq!(sink.program(), "aplay");
        assert_eq!(sink.args(), ["-q".to_string(), "-".to_string()]);
        assert!(PlayerCommandSink::parse("   ").is_none());
    }

    #[test]
    fn test_missing_player_is_quiet() {
        let sink = PlayerCommandSink::new("retrochat-no-such-player", vec![]);
        sink.play(Cue::Blip);
        sink.stop_all();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_player_closing_stdin_is_reaped() {
        let child = Command::new("sh")
            .args(["-c", "exec 0<&-; sleep 30"])
            .stdin(Stdio::piped())
            .spawn()
            .unwrap();
        let pid = child.id();

        let err = feed(child, &vec![0u8; 1 << 20]).unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
        assert!(!std::path::Path::new(&format!("/proc/{pid}")).exists());
    }
}
