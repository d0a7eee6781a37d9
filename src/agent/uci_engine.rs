//! Third-party engine adapter speaking a minimal UCI subset.
//!
//! Only what a best-move request needs is implemented: `uci`/`uciok` and
//! `isready`/`readyok` during start, `position fen` and `go depth` per
//! search, `bestmove` as the answer, `stop` and `quit` on shutdown. Options,
//! info lines and pondering are ignored.

use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::ai::CancelToken;
use super::engine::{deliver_best_move, BestMoveCallback, Engine};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::game_repr::validate_fen;

/// The child process and its pipes, each behind its own lock so `stop` can
/// write while a search thread is blocked reading.
struct UciProcess {
    child: Mutex<Child>,
    stdin: Mutex<ChildStdin>,
    stdout: Mutex<BufReader<ChildStdout>>,
}

impl UciProcess {
    fn spawn(path: &PathBuf) -> EngineResult<Self> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;
        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                return Err(EngineError::Process(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "engine pipes unavailable",
                )));
            }
        };
        Ok(Self {
            child: Mutex::new(child),
            stdin: Mutex::new(stdin),
            stdout: Mutex::new(BufReader::new(stdout)),
        })
    }

    fn send(&self, command: &str) -> io::Result<()> {
        log::trace!("uci > {command}");
        let mut stdin = self.stdin.lock();
        writeln!(stdin, "{command}")?;
        stdin.flush()
    }

    /// Reads lines until one starts with `keyword`; EOF is an error.
    fn wait_for(reader: &mut BufReader<ChildStdout>, keyword: &str) -> io::Result<String> {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("engine exited before '{keyword}'"),
                ));
            }
            let trimmed = line.trim();
            log::trace!("uci < {trimmed}");
            if trimmed.split_whitespace().next() == Some(keyword) {
                return Ok(trimmed.to_string());
            }
        }
    }

    fn handshake(&self) -> io::Result<()> {
        let mut stdout = self.stdout.lock();
        self.send("uci")?;
        Self::wait_for(&mut stdout, "uciok")?;
        self.send("isready")?;
        Self::wait_for(&mut stdout, "readyok")?;
        Ok(())
    }

    /// Runs one search; `None` when the engine reports no move.
    fn best_move(&self, fen: &str, depth: u8) -> io::Result<Option<String>> {
        // Holding stdout for the whole exchange keeps searches from interleaving
        let mut stdout = self.stdout.lock();
        self.send(&format!("position fen {fen}"))?;
        self.send(&format!("go depth {depth}"))?;
        let line = Self::wait_for(&mut stdout, "bestmove")?;
        Ok(line
            .split_whitespace()
            .nth(1)
            .filter(|mv| *mv != "(none)" && *mv != "0000")
            .map(str::to_string))
    }

    fn shutdown(&self) {
        let _ = self.send("stop");
        let _ = self.send("quit");
        let mut child = self.child.lock();
        let _ = child.kill();
        let _ = child.wait();
    }
}

pub struct UciEngine {
    path: PathBuf,
    config: EngineConfig,
    process: Option<Arc<UciProcess>>,
    fen: Option<String>,
    cancel: CancelToken,
}

impl UciEngine {
    pub fn new(path: PathBuf, config: EngineConfig) -> Self {
        Self {
            path,
            config,
            process: None,
            fen: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Engine for UciEngine {
    fn start(&mut self) -> EngineResult<()> {
        if self.process.is_some() {
            return Ok(());
        }
        let process = UciProcess::spawn(&self.path)?;
        if let Err(err) = process.handshake() {
            process.shutdown();
            return Err(err.into());
        }
        self.process = Some(Arc::new(process));
        self.cancel = CancelToken::new();
        log::debug!("uci engine {} ready", self.path.display());
        Ok(())
    }

    fn set_fen(&mut self, fen: &str) -> EngineResult<()> {
        validate_fen(fen)?;
        self.fen = Some(fen.trim().to_string());
        Ok(())
    }

    fn get_best_moves(
        &mut self,
        depth: u8,
        on_result: BestMoveCallback,
        min_delay: Duration,
    ) -> EngineResult<()> {
        let started = Instant::now();
        let process = self.process.clone().ok_or(EngineError::NotStarted)?;
        let fen = self.fen.clone().ok_or(EngineError::NoPosition)?;
        let cancel = self.cancel.clone();
        let depth = depth.max(1);

        thread::Builder::new()
            .name("uci-search".to_string())
            .spawn(move || {
                let search = || match process.best_move(&fen, depth) {
                    Ok(Some(mv)) => Some(mv),
                    Ok(None) => {
                        log::warn!("uci engine reported no move");
                        None
                    }
                    Err(err) => {
                        if !cancel.is_cancelled() {
                            log::error!("uci search failed: {err}");
                        }
                        None
                    }
                };
                deliver_best_move(search, started, min_delay, &cancel, on_result);
            })?;
        Ok(())
    }

    fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(process) = self.process.take() {
            process.shutdown();
            log::debug!("uci engine {} stopped", self.path.display());
        }
    }

    fn name(&self) -> &str {
        "UCI"
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
